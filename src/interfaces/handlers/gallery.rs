use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{
    entities::fan_photo::{FanPhotoActionResponse, NewFanPhotoRequest},
    errors::AppError,
    use_cases::extractors::{AdminIdentity, AuthIdentity},
    AppState,
};

#[instrument(skip(state, body), fields(user = %caller.0.subject))]
pub async fn submit_photo(
    state: web::Data<AppState>,
    caller: AuthIdentity,
    body: web::Json<NewFanPhotoRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.gallery_handler.submit_photo(&caller.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn list_approved_photos(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let photos = state.gallery_handler.list_approved().await?;
    Ok(HttpResponse::Ok().json(photos))
}

#[instrument(skip(state, _admin))]
pub async fn list_all_photos(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let photos = state.gallery_handler.list_all().await?;
    Ok(HttpResponse::Ok().json(photos))
}

#[instrument(skip(state, _admin))]
pub async fn list_pending_photos(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let photos = state.gallery_handler.list_pending().await?;
    Ok(HttpResponse::Ok().json(photos))
}

#[instrument(skip(state, admin))]
pub async fn approve_photo(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state.gallery_handler.approve_photo(path.into_inner(), &admin.0).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, admin))]
pub async fn reject_photo(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state.gallery_handler.reject_photo(path.into_inner(), &admin.0).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, _admin))]
pub async fn delete_photo(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    // Blob cleanup keeps running after the response is sent
    let _cleanup = state.gallery_handler.delete_photo(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FanPhotoActionResponse::message("Photo removed successfully!")))
}

#[instrument(skip(state, caller))]
pub async fn my_photos(state: web::Data<AppState>, caller: AuthIdentity) -> Result<HttpResponse, AppError> {
    let photos = state.gallery_handler.list_own(&caller.0).await?;
    Ok(HttpResponse::Ok().json(photos))
}
