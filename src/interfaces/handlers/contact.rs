use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{
    entities::contact_message::{ContactMessageUpdate, NewContactMessage},
    errors::AppError,
    use_cases::extractors::AdminIdentity,
    AppState,
};

#[instrument(skip(state, body))]
pub async fn submit_contact_message(
    state: web::Data<AppState>,
    body: web::Json<NewContactMessage>,
) -> Result<HttpResponse, AppError> {
    let response = state.contact_handler.submit_message(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, _admin))]
pub async fn list_contact_messages(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let messages = state.contact_handler.list_messages().await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(state, _admin, body))]
pub async fn update_contact_message(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<ContactMessageUpdate>,
) -> Result<HttpResponse, AppError> {
    let message = state
        .contact_handler
        .update_message(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(message))
}
