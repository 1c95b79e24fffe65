use async_trait::async_trait;

use crate::{
    entities::fan_photo::{FanPhoto, FanPhotoInsert, StatusChange},
    errors::AppError,
};

/// Persistence for fan photo metadata. Listings are newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FanPhotoRepository: Send + Sync {
    async fn create_fan_photo(&self, photo: &FanPhotoInsert) -> Result<FanPhoto, AppError>;
    async fn get_fan_photo_by_id(&self, id: i64) -> Result<Option<FanPhoto>, AppError>;
    async fn list_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError>;
    async fn list_approved_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError>;
    async fn list_pending_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError>;
    async fn list_fan_photos_by_owner(&self, user_id: i64) -> Result<Vec<FanPhoto>, AppError>;
    /// Fails with `AppError::NotFound` when no row has `id`.
    async fn set_fan_photo_status(&self, id: i64, change: &StatusChange) -> Result<FanPhoto, AppError>;
    /// Fails with `AppError::NotFound` when no row has `id`.
    async fn delete_fan_photo(&self, id: i64) -> Result<(), AppError>;
}
