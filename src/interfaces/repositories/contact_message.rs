use async_trait::async_trait;

use crate::{
    entities::contact_message::{ContactMessage, ContactMessageInsert, ContactMessageUpdate},
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError>;
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn update_contact_message(&self, id: i64, update: &ContactMessageUpdate) -> Result<ContactMessage, AppError>;
}
