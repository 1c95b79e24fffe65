use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start, for uptime reporting. Forced once in `main`.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const API_PREFIX: &str = "/api";
pub const ADMIN_PREFIX: &str = "/api/admin";
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,actix_server=info";
