use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::analytics::{AnalyticsEvent, AnalyticsQuery, NewAnalyticsEvent},
    errors::AppError,
    repositories::analytics::AnalyticsRepository,
};

pub struct AnalyticsHandler<R: ?Sized> {
    pub analytics_repo: Arc<R>,
}

impl<R> AnalyticsHandler<R>
where
    R: AnalyticsRepository + ?Sized,
{
    pub fn new(analytics_repo: Arc<R>) -> Self {
        AnalyticsHandler { analytics_repo }
    }

    pub async fn record_event(
        &self,
        request: NewAnalyticsEvent,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Result<AnalyticsEvent, AppError> {
        request.validate()?;
        self.analytics_repo
            .create_analytics_event(&request.prepare_for_insert(user_agent, ip_address))
            .await
    }

    /// Newest events first, at most `query.limit` of them.
    pub async fn list_events(&self, query: &AnalyticsQuery) -> Result<Vec<AnalyticsEvent>, AppError> {
        self.analytics_repo.list_analytics_events(query.effective_limit()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::analytics::MockAnalyticsRepository;

    #[tokio::test]
    async fn listing_uses_default_limit() {
        let mut repo = MockAnalyticsRepository::new();
        repo.expect_list_analytics_events()
            .withf(|limit| *limit == 100)
            .times(1)
            .returning(|_| Ok(vec![]));

        let events = AnalyticsHandler::new(Arc::new(repo))
            .list_events(&AnalyticsQuery { limit: None })
            .await
            .unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn request_metadata_is_attached() {
        let mut repo = MockAnalyticsRepository::new();
        repo.expect_create_analytics_event()
            .withf(|event| {
                event.event_type == "page_view"
                    && event.ip_address.as_deref() == Some("10.0.0.1")
                    && event.user_agent.as_deref() == Some("test-agent")
            })
            .times(1)
            .returning(|event| {
                Ok(AnalyticsEvent {
                    id: 1,
                    user_id: event.user_id,
                    event_type: event.event_type.clone(),
                    event_data: None,
                    user_agent: event.user_agent.clone(),
                    ip_address: event.ip_address.clone(),
                    created_at: event.created_at,
                })
            });

        let request = NewAnalyticsEvent {
            user_id: None,
            event_type: " page_view ".into(),
            event_data: None,
        };

        AnalyticsHandler::new(Arc::new(repo))
            .record_event(request, Some("test-agent".into()), Some("10.0.0.1".into()))
            .await
            .unwrap();
    }
}
