use actix_web::{web, HttpResponse};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheckResponse {
    status: &'static str,
    uptime: String,
    started_at: String,
    timestamp: String,
    version: &'static str,
    backend: &'static str,
    database: &'static str,
    auth: &'static str,
}

/// Liveness plus a round trip to the storage backend.
#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let database = match state.store.check_connection().await {
        Ok(()) => "OK",
        Err(e) => {
            tracing::warn!("Health check could not reach the backend: {}", e);
            "Unavailable"
        }
    };
    let healthy = database == "OK";

    let body = HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" },
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        started_at: START_TIME.to_rfc3339(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        backend: state.backend.as_str(),
        database,
        auth: state.auth_strategy.name(),
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
