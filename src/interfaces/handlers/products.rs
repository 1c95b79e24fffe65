use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{
    entities::product::{NewProductRequest, ProductUpdate},
    errors::AppError,
    use_cases::extractors::AdminIdentity,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_active_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = state.catalog_handler.list_active_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[instrument(skip(state, _admin))]
pub async fn list_products(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let products = state.catalog_handler.list_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[instrument(skip(state, _admin, body))]
pub async fn create_product(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    body: web::Json<NewProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = state.catalog_handler.create_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

#[instrument(skip(state, _admin, body))]
pub async fn update_product(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
) -> Result<HttpResponse, AppError> {
    let product = state
        .catalog_handler
        .update_product(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[instrument(skip(state, _admin))]
pub async fn delete_product(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    state.catalog_handler.delete_product(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
