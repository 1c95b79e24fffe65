use actix_web::web;

use crate::handlers::json_error::{json_error_handler, path_error_handler};

pub fn config_routes(cfg: &mut web::ServiceConfig, limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(limit)
            .error_handler(json_error_handler),
    )
    .app_data(web::PathConfig::default().error_handler(path_error_handler));
}
