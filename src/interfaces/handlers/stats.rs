use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::{
    errors::AppError,
    use_cases::extractors::{AdminIdentity, AuthIdentity},
    AppState,
};

#[instrument(skip(state, _admin))]
pub async fn admin_stats(state: web::Data<AppState>, _admin: AdminIdentity) -> Result<HttpResponse, AppError> {
    let stats = state.stats_handler.dashboard().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Same figures with fan photo counts, open to any logged-in caller.
#[instrument(skip(state, _caller))]
pub async fn gallery_stats(state: web::Data<AppState>, _caller: AuthIdentity) -> Result<HttpResponse, AppError> {
    let stats = state.stats_handler.dashboard_with_gallery().await?;
    Ok(HttpResponse::Ok().json(stats))
}
