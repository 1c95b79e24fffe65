use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use validator::Validate;

pub const DEFAULT_EVENT_LIMIT: i64 = 100;
pub const MAX_EVENT_LIMIT: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct AnalyticsEvent {
    pub id: i64,
    pub user_id: Option<i64>,
    pub event_type: String,
    pub event_data: Option<Json<Value>>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEventInsert {
    pub user_id: Option<i64>,
    pub event_type: String,
    pub event_data: Option<Value>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalyticsEvent {
    pub user_id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Event type must be between 1 and 100 characters"))]
    pub event_type: String,

    pub event_data: Option<Value>,
}

impl NewAnalyticsEvent {
    /// Client metadata comes from the request, never from the body.
    pub fn prepare_for_insert(
        self,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> AnalyticsEventInsert {
        AnalyticsEventInsert {
            user_id: self.user_id,
            event_type: self.event_type.trim().to_string(),
            event_data: self.event_data,
            user_agent,
            ip_address,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub limit: Option<i64>,
}

impl AnalyticsQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_EVENT_LIMIT)
            .clamp(1, MAX_EVENT_LIMIT)
    }
}
