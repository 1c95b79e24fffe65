use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{
    entities::order::{NewOrderRequest, OrderStatusUpdate},
    errors::AppError,
    use_cases::extractors::{AdminIdentity, AuthIdentity},
    AppState,
};

#[instrument(skip(state, caller, body))]
pub async fn place_order(
    state: web::Data<AppState>,
    caller: AuthIdentity,
    body: web::Json<NewOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let details = state.order_handler.place_order(&caller.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(details))
}

#[instrument(skip(state, caller))]
pub async fn my_orders(state: web::Data<AppState>, caller: AuthIdentity) -> Result<HttpResponse, AppError> {
    let orders = state.order_handler.list_customer_orders(&caller.0).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[instrument(skip(state, _admin))]
pub async fn list_orders(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let orders = state.order_handler.list_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[instrument(skip(state, _admin))]
pub async fn get_order(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let details = state.order_handler.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}

#[instrument(skip(state, _admin, body))]
pub async fn update_order_status(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<OrderStatusUpdate>,
) -> Result<HttpResponse, AppError> {
    let order = state
        .order_handler
        .update_status(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(order))
}
