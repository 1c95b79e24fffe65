use async_trait::async_trait;

use crate::{
    entities::analytics::{AnalyticsEvent, AnalyticsEventInsert},
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn create_analytics_event(&self, event: &AnalyticsEventInsert) -> Result<AnalyticsEvent, AppError>;
    /// Newest events first, at most `limit` of them.
    async fn list_analytics_events(&self, limit: i64) -> Result<Vec<AnalyticsEvent>, AppError>;
}
