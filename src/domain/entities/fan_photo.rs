use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::utils::data_url::DataUrl;

const MAX_CAPTION_LENGTH: u64 = 500;
const MAX_NAME_LENGTH: u64 = 100;

// ───── Status ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoStatus {
    Pending,
    Approved,
    Rejected,
}

impl PhotoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoStatus::Pending => "pending",
            PhotoStatus::Approved => "approved",
            PhotoStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PhotoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Display, Error)]
#[display("Unknown photo status: {_0}")]
pub struct UnknownPhotoStatus(#[error(not(source))] pub String);

impl FromStr for PhotoStatus {
    type Err = UnknownPhotoStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PhotoStatus::Pending),
            "approved" => Ok(PhotoStatus::Approved),
            "rejected" => Ok(PhotoStatus::Rejected),
            other => Err(UnknownPhotoStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for PhotoStatus {
    type Error = UnknownPhotoStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ───── Database Models ───────────────────────────────────────────────

/// A fan-submitted image and its moderation state.
///
/// Serialized camelCase for API clients; deserialized from snake_case rows
/// returned by the hosted REST backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct FanPhoto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub image_url: String,
    pub storage_key: Option<String>,
    pub caption: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: PhotoStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanPhotoInsert {
    pub user_id: Option<i64>,
    pub image_url: String,
    pub storage_key: Option<String>,
    pub caption: Option<String>,
    pub status: PhotoStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FanPhotoInsert {
    /// New submissions always start out pending.
    pub fn pending(
        user_id: Option<i64>,
        image_url: String,
        storage_key: Option<String>,
        caption: Option<String>,
    ) -> Self {
        let now = Utc::now();
        FanPhotoInsert {
            user_id,
            image_url,
            storage_key,
            caption,
            status: PhotoStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Column values written by a moderation transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    pub status: PhotoStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl StatusChange {
    /// Approve stamps moderator and time, reject keeps only the moderator,
    /// returning to pending clears both.
    pub fn new(status: PhotoStatus, moderator: &str, at: DateTime<Utc>) -> Self {
        let (approved_by, approved_at) = match status {
            PhotoStatus::Approved => (Some(moderator.to_string()), Some(at)),
            PhotoStatus::Rejected => (Some(moderator.to_string()), None),
            PhotoStatus::Pending => (None, None),
        };

        StatusChange {
            status,
            approved_by,
            approved_at,
            updated_at: at,
        }
    }
}

// ───── API Request Models ────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_image_source", skip_on_field_errors = false))]
pub struct NewFanPhotoRequest {
    #[validate(length(max = MAX_NAME_LENGTH, message = "Name is too long"))]
    pub name: Option<String>,

    #[validate(length(max = MAX_CAPTION_LENGTH, message = "Caption must be at most 500 characters"))]
    pub caption: Option<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,

    #[validate(custom(function = "validate_image_data"))]
    pub image_data: Option<String>,
}

fn validate_image_url(image_url: &str) -> Result<(), ValidationError> {
    match Url::parse(image_url.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => {
            let mut error = ValidationError::new("image_url");
            error.message = Some("Image URL must be an http(s) URL".into());
            Err(error)
        }
    }
}

fn validate_image_data(image_data: &str) -> Result<(), ValidationError> {
    DataUrl::parse(image_data).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("image_data");
        error.message = Some(e.to_string().into());
        error
    })
}

fn validate_image_source(request: &NewFanPhotoRequest) -> Result<(), ValidationError> {
    let has_url = request.image_url.as_deref().is_some_and(|s| !s.trim().is_empty());
    let has_data = request.image_data.as_deref().is_some_and(|s| !s.trim().is_empty());

    if has_url != has_data {
        Ok(())
    } else {
        let mut error = ValidationError::new("image_source");
        error.message = Some("Provide exactly one of imageUrl or imageData".into());
        Err(error)
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FanPhotoActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<FanPhoto>,
}

impl FanPhotoActionResponse {
    pub fn with_photo(message: &str, photo: FanPhoto) -> Self {
        FanPhotoActionResponse {
            success: true,
            message: message.to_string(),
            photo: Some(photo),
        }
    }

    pub fn message(message: &str) -> Self {
        FanPhotoActionResponse {
            success: true,
            message: message.to_string(),
            photo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn approval_stamps_moderator_and_time() {
        let now = Utc::now();
        let change = StatusChange::new(PhotoStatus::Approved, "admin", now);

        assert_eq!(change.approved_by.as_deref(), Some("admin"));
        assert_eq!(change.approved_at, Some(now));
    }

    #[test]
    fn rejection_keeps_moderator_but_no_approval_time() {
        let change = StatusChange::new(PhotoStatus::Rejected, "mod", Utc::now());

        assert_eq!(change.status, PhotoStatus::Rejected);
        assert_eq!(change.approved_by.as_deref(), Some("mod"));
        assert!(change.approved_at.is_none());
    }

    #[test]
    fn back_to_pending_clears_moderation_fields() {
        let change = StatusChange::new(PhotoStatus::Pending, "mod", Utc::now());

        assert!(change.approved_by.is_none());
        assert!(change.approved_at.is_none());
    }

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("approved".parse::<PhotoStatus>().unwrap(), PhotoStatus::Approved);
        assert!("archived".parse::<PhotoStatus>().is_err());
    }

    #[test]
    fn request_requires_an_image_source() {
        let request = NewFanPhotoRequest {
            name: Some("Ana".into()),
            caption: Some("party".into()),
            image_url: None,
            image_data: None,
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn request_rejects_two_image_sources() {
        let request = NewFanPhotoRequest {
            name: None,
            caption: None,
            image_url: Some("https://cdn.example.com/a.jpg".into()),
            image_data: Some(PIXEL.into()),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn request_accepts_inline_image_data() {
        let request = NewFanPhotoRequest {
            name: None,
            caption: Some("party".into()),
            image_url: None,
            image_data: Some(PIXEL.into()),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_rejects_non_image_payload() {
        let request = NewFanPhotoRequest {
            name: None,
            caption: None,
            image_url: None,
            image_data: Some("data:text/plain;base64,aGVsbG8=".into()),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn linked_images_must_use_http() {
        let linked = |url: &str| NewFanPhotoRequest {
            name: None,
            caption: None,
            image_url: Some(url.into()),
            image_data: None,
        };

        assert!(linked("https://cdn.example.com/a.jpg").validate().is_ok());
        assert!(linked("http://cdn.example.com/a.jpg").validate().is_ok());

        for bad in ["javascript:alert(1)", PIXEL, "file:///etc/passwd", "not a url"] {
            let errors = linked(bad).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("image_url"), "{} was accepted", bad);
        }
    }

    #[test]
    fn photo_serializes_camel_case() {
        let now = Utc::now();
        let photo = FanPhoto {
            id: 5,
            user_id: Some(7),
            image_url: "https://cdn.example.com/a.jpg".into(),
            storage_key: None,
            caption: Some("party".into()),
            status: PhotoStatus::Pending,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&photo).unwrap();
        assert_eq!(value["userId"], 7);
        assert_eq!(value["imageUrl"], "https://cdn.example.com/a.jpg");
        assert_eq!(value["status"], "pending");
        assert!(value["approvedAt"].is_null());
    }
}
