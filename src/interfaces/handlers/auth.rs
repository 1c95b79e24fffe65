use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::{
    entities::user::{LoginRequest, RegisterRequest},
    errors::AppError,
    use_cases::extractors::AuthIdentity,
    AppState,
};

#[instrument(skip(state, body))]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    let outcome = state.auth_handler.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().cookie(outcome.cookie).json(outcome.response))
}

#[instrument(skip(state, body))]
pub async fn register(state: web::Data<AppState>, body: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    let outcome = state.auth_handler.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().cookie(outcome.cookie).json(outcome.response))
}

#[instrument(skip(state, req))]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let credential = state.auth_strategy.credential(&req);
    let cookie = state.auth_handler.logout(credential).await?;

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true, "message": "Logged out successfully" })))
}

#[instrument(skip(caller))]
pub async fn current_user(caller: AuthIdentity) -> HttpResponse {
    HttpResponse::Ok().json(caller.0)
}
