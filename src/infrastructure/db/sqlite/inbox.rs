use async_trait::async_trait;
use sqlx::types::Json;

use crate::{
    entities::{
        analytics::{AnalyticsEvent, AnalyticsEventInsert},
        contact_message::{ContactMessage, ContactMessageInsert, ContactMessageUpdate},
    },
    errors::AppError,
    repositories::{analytics::AnalyticsRepository, contact_message::ContactMessageRepository},
};

use super::SqliteStore;

#[async_trait]
impl ContactMessageRepository for SqliteStore {
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message, phone, is_read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.subject)
        .bind(&msg.message)
        .bind(&msg.phone)
        .bind(msg.is_read)
        .bind(msg.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_contact_message(&self, id: i64, update: &ContactMessageUpdate) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET is_read = COALESCE(?, is_read) WHERE id = ? RETURNING *",
        )
        .bind(update.is_read)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact message not found".into()))
    }
}

#[async_trait]
impl AnalyticsRepository for SqliteStore {
    async fn create_analytics_event(&self, event: &AnalyticsEventInsert) -> Result<AnalyticsEvent, AppError> {
        sqlx::query_as::<_, AnalyticsEvent>(
            r#"
            INSERT INTO analytics_events (user_id, event_type, event_data, user_agent, ip_address, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(event.user_id)
        .bind(&event.event_type)
        .bind(event.event_data.as_ref().map(Json))
        .bind(&event.user_agent)
        .bind(&event.ip_address)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_analytics_events(&self, limit: i64) -> Result<Vec<AnalyticsEvent>, AppError> {
        sqlx::query_as::<_, AnalyticsEvent>(
            "SELECT * FROM analytics_events ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
