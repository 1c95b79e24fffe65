use actix_web::web;

use crate::{
    constants::API_PREFIX,
    handlers::{json_error::api_not_found, system},
};

mod admin;
mod auth;
mod json_error;
mod storefront;

/// Mounts every API route. Unmatched `/api/*` paths get a JSON 404.
pub fn configure_routes(cfg: &mut web::ServiceConfig, max_json_payload_bytes: usize) {
    cfg.configure(|cfg| json_error::config_routes(cfg, max_json_payload_bytes));

    cfg.service(
        web::scope(API_PREFIX)
            .service(web::resource("/health").route(web::get().to(system::health_check)))
            .configure(auth::config_routes)
            .configure(admin::config_routes)
            .configure(storefront::config_routes)
            .default_service(web::to(api_not_found)),
    );
}
