use actix_web::web;

use crate::handlers::{json_error::api_not_found, analytics, contact, customers, gallery, orders, products, stats};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(web::resource("/fan-gallery").route(web::get().to(gallery::list_all_photos)))
            .service(web::resource("/fan-gallery/pending").route(web::get().to(gallery::list_pending_photos)))
            .service(web::resource("/fan-gallery/{photo_id}").route(web::delete().to(gallery::delete_photo)))
            .service(web::resource("/fan-gallery/{photo_id}/approve").route(web::patch().to(gallery::approve_photo)))
            .service(web::resource("/fan-gallery/{photo_id}/reject").route(web::patch().to(gallery::reject_photo)))
            .service(web::resource("/contact-messages").route(web::get().to(contact::list_contact_messages)))
            .service(
                web::resource("/contact-messages/{message_id}").route(web::patch().to(contact::update_contact_message)),
            )
            .service(
                web::resource("/products")
                    .route(web::get().to(products::list_products))
                    .route(web::post().to(products::create_product)),
            )
            .service(
                web::resource("/products/{product_id}")
                    .route(web::patch().to(products::update_product))
                    .route(web::delete().to(products::delete_product)),
            )
            .service(web::resource("/customers").route(web::get().to(customers::list_customers)))
            .service(web::resource("/customers/{customer_id}").route(web::patch().to(customers::update_customer)))
            .service(web::resource("/orders").route(web::get().to(orders::list_orders)))
            .service(web::resource("/orders/{order_id}").route(web::get().to(orders::get_order)))
            .service(web::resource("/orders/{order_id}/status").route(web::patch().to(orders::update_order_status)))
            .service(web::resource("/analytics").route(web::get().to(analytics::list_events)))
            .service(web::resource("/stats").route(web::get().to(stats::admin_stats)))
            .default_service(web::to(api_not_found)),
    );
}
