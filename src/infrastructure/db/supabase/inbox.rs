use async_trait::async_trait;

use crate::{
    entities::{
        analytics::{AnalyticsEvent, AnalyticsEventInsert},
        contact_message::{ContactMessage, ContactMessageInsert, ContactMessageUpdate},
    },
    errors::AppError,
    repositories::{analytics::AnalyticsRepository, contact_message::ContactMessageRepository},
};

use super::{eq, SupabaseStore, NEWEST_FIRST};

#[async_trait]
impl ContactMessageRepository for SupabaseStore {
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        self.insert("contact_messages", msg).await
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.select("contact_messages", &[("order", NEWEST_FIRST.to_string())]).await
    }

    async fn update_contact_message(&self, id: i64, update: &ContactMessageUpdate) -> Result<ContactMessage, AppError> {
        // contact_messages has no updated_at column
        self.update("contact_messages", &[("id", eq(id))], update)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact message not found".into()))
    }
}

#[async_trait]
impl AnalyticsRepository for SupabaseStore {
    async fn create_analytics_event(&self, event: &AnalyticsEventInsert) -> Result<AnalyticsEvent, AppError> {
        self.insert("analytics_events", event).await
    }

    async fn list_analytics_events(&self, limit: i64) -> Result<Vec<AnalyticsEvent>, AppError> {
        self.select(
            "analytics_events",
            &[("order", NEWEST_FIRST.to_string()), ("limit", limit.to_string())],
        )
        .await
    }
}
