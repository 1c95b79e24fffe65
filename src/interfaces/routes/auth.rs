use actix_web::web;

use crate::handlers::{auth, json_error::api_not_found};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(web::resource("/login").route(web::post().to(auth::login)))
            .service(web::resource("/register").route(web::post().to(auth::register)))
            .service(web::resource("/logout").route(web::post().to(auth::logout)))
            .service(web::resource("/user").route(web::get().to(auth::current_user)))
            .default_service(web::to(api_not_found)),
    );
}
