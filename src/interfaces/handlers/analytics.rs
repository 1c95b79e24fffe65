use actix_web::{web, HttpRequest, HttpResponse};
use tracing::instrument;

use crate::{
    entities::analytics::{AnalyticsQuery, NewAnalyticsEvent},
    errors::AppError,
    use_cases::extractors::AdminIdentity,
    utils::get_client_ip::{get_client_ip, get_user_agent},
    AppState,
};

#[instrument(skip(state, req, body))]
pub async fn record_event(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NewAnalyticsEvent>,
) -> Result<HttpResponse, AppError> {
    let ip_address = get_client_ip(&req, state.trust_forwarded_for);
    let user_agent = get_user_agent(&req);

    let event = state
        .analytics_handler
        .record_event(body.into_inner(), user_agent, ip_address)
        .await?;
    Ok(HttpResponse::Created().json(event))
}

#[instrument(skip(state, _admin))]
pub async fn list_events(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse, AppError> {
    let events = state.analytics_handler.list_events(&query).await?;
    Ok(HttpResponse::Ok().json(events))
}
