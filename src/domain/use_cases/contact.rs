use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::contact_message::{ContactMessage, ContactMessageResponse, ContactMessageUpdate, NewContactMessage},
    errors::AppError,
    repositories::contact_message::ContactMessageRepository,
};

pub struct ContactHandler<R: ?Sized> {
    pub contact_repo: Arc<R>,
}

impl<R> ContactHandler<R>
where
    R: ContactMessageRepository + ?Sized,
{
    pub fn new(contact_repo: Arc<R>) -> Self {
        ContactHandler { contact_repo }
    }

    /// Stores a message from the public contact form.
    pub async fn submit_message(&self, request: NewContactMessage) -> Result<ContactMessageResponse, AppError> {
        request.validate()?;

        let message = self.contact_repo.create_contact_message(&request.prepare_for_insert()).await?;
        tracing::info!(message_id = message.id, "Contact message received");

        Ok(ContactMessageResponse {
            success: true,
            message: "Message sent successfully!".to_string(),
        })
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.contact_repo.list_contact_messages().await
    }

    pub async fn update_message(&self, id: i64, update: ContactMessageUpdate) -> Result<ContactMessage, AppError> {
        if update.is_read.is_none() {
            return Err(AppError::InvalidInput("Nothing to update".to_string()));
        }

        self.contact_repo
            .update_contact_message(id, &update)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Contact message not found".to_string()),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::contact_message::MockContactMessageRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn message_is_sanitized_before_storage() {
        let mut repo = MockContactMessageRepository::new();
        repo.expect_create_contact_message()
            .withf(|msg| msg.message == "Hello there" && msg.email == "ana@example.com" && !msg.is_read)
            .times(1)
            .returning(|msg| {
                Ok(ContactMessage {
                    id: 1,
                    name: msg.name.clone(),
                    email: msg.email.clone(),
                    subject: msg.subject.clone(),
                    message: msg.message.clone(),
                    phone: msg.phone.clone(),
                    is_read: msg.is_read,
                    created_at: Utc::now(),
                })
            });

        let request = NewContactMessage {
            name: "Ana".into(),
            email: "Ana@Example.com".into(),
            subject: None,
            message: "<script>alert(1)</script>Hello there".into(),
            phone: None,
        };

        let response = ContactHandler::new(Arc::new(repo)).submit_message(request).await.unwrap();
        assert!(response.success);
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let repo = MockContactMessageRepository::new();

        let result = ContactHandler::new(Arc::new(repo))
            .update_message(1, ContactMessageUpdate::default())
            .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
