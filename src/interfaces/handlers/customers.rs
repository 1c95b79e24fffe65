use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{entities::user::CustomerUpdate, errors::AppError, use_cases::extractors::AdminIdentity, AppState};

#[instrument(skip(state, _admin))]
pub async fn list_customers(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let customers = state.customer_handler.list_customers().await?;
    Ok(HttpResponse::Ok().json(customers))
}

#[instrument(skip(state, _admin, body))]
pub async fn update_customer(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<CustomerUpdate>,
) -> Result<HttpResponse, AppError> {
    let customer = state
        .customer_handler
        .update_customer(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(customer))
}
