use actix_web::web;

use crate::handlers::{json_error::api_not_found, analytics, contact, gallery, orders, products, stats};

/// Public and customer-facing routes.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/fan-gallery")
            .route(web::get().to(gallery::list_approved_photos))
            .route(web::post().to(gallery::submit_photo)),
    )
    .service(web::resource("/user/my-photos").route(web::get().to(gallery::my_photos)))
    .service(web::resource("/user/orders").route(web::get().to(orders::my_orders)))
    .service(web::resource("/products").route(web::get().to(products::list_active_products)))
    .service(web::resource("/orders").route(web::post().to(orders::place_order)))
    .service(web::resource("/contact").route(web::post().to(contact::submit_contact_message)))
    .service(web::resource("/analytics").route(web::post().to(analytics::record_event)))
    .service(
        web::scope("/supabase")
            .service(web::resource("/products").route(web::get().to(products::list_active_products)))
            .service(web::resource("/fan-gallery").route(web::get().to(gallery::list_approved_photos)))
            .service(web::resource("/stats").route(web::get().to(stats::gallery_stats)))
            .default_service(web::to(api_not_found)),
    );
}
