use async_trait::async_trait;

use crate::{
    entities::fan_photo::{FanPhoto, FanPhotoInsert, PhotoStatus, StatusChange},
    errors::AppError,
    repositories::fan_photo::FanPhotoRepository,
};

use super::{eq, SupabaseStore, NEWEST_FIRST};

const TABLE: &str = "fan_photos";

impl SupabaseStore {
    async fn fan_photos_where(&self, column: &str, value: String) -> Result<Vec<FanPhoto>, AppError> {
        self.select(TABLE, &[(column, value), ("order", NEWEST_FIRST.to_string())]).await
    }
}

#[async_trait]
impl FanPhotoRepository for SupabaseStore {
    async fn create_fan_photo(&self, photo: &FanPhotoInsert) -> Result<FanPhoto, AppError> {
        self.insert(TABLE, photo).await
    }

    async fn get_fan_photo_by_id(&self, id: i64) -> Result<Option<FanPhoto>, AppError> {
        self.select_one(TABLE, &[("id", eq(id))]).await
    }

    async fn list_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.select(TABLE, &[("order", NEWEST_FIRST.to_string())]).await
    }

    async fn list_approved_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.fan_photos_where("status", eq(PhotoStatus::Approved)).await
    }

    async fn list_pending_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.fan_photos_where("status", eq(PhotoStatus::Pending)).await
    }

    async fn list_fan_photos_by_owner(&self, user_id: i64) -> Result<Vec<FanPhoto>, AppError> {
        self.fan_photos_where("user_id", eq(user_id)).await
    }

    async fn set_fan_photo_status(&self, id: i64, change: &StatusChange) -> Result<FanPhoto, AppError> {
        self.update(TABLE, &[("id", eq(id))], change)
            .await?
            .ok_or_else(|| AppError::NotFound("Fan photo not found".into()))
    }

    async fn delete_fan_photo(&self, id: i64) -> Result<(), AppError> {
        match self.delete_where(TABLE, &[("id", eq(id))]).await? {
            0 => Err(AppError::NotFound("Fan photo not found".into())),
            _ => Ok(()),
        }
    }
}
