use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::sanitize::clean_text;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 200))]
    pub subject: Option<String>,

    #[validate(length(min = 5, max = 5000, message = "Message must be between 5 and 5000 characters"))]
    pub message: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

impl NewContactMessage {
    pub fn prepare_for_insert(self) -> ContactMessageInsert {
        ContactMessageInsert {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            subject: clean_text(self.subject.as_deref()),
            message: clean_text(Some(&self.message)).unwrap_or_default(),
            phone: self.phone.map(|p| p.trim().to_string()),
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageInsert {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub phone: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub phone: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ContactMessageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ContactMessageResponse {
    pub success: bool,
    pub message: String,
}
