use async_trait::async_trait;

use crate::{
    entities::fan_photo::{FanPhoto, FanPhotoInsert, PhotoStatus, StatusChange},
    errors::AppError,
    repositories::fan_photo::FanPhotoRepository,
};

use super::PgStore;

impl PgStore {
    async fn fan_photos_with_status(&self, status: PhotoStatus) -> Result<Vec<FanPhoto>, AppError> {
        sqlx::query_as::<_, FanPhoto>(
            "SELECT * FROM fan_photos WHERE status = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}

#[async_trait]
impl FanPhotoRepository for PgStore {
    async fn create_fan_photo(&self, photo: &FanPhotoInsert) -> Result<FanPhoto, AppError> {
        sqlx::query_as::<_, FanPhoto>(
            r#"
            INSERT INTO fan_photos (user_id, image_url, storage_key, caption, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(photo.user_id)
        .bind(&photo.image_url)
        .bind(&photo.storage_key)
        .bind(&photo.caption)
        .bind(photo.status.as_str())
        .bind(photo.created_at)
        .bind(photo.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_fan_photo_by_id(&self, id: i64) -> Result<Option<FanPhoto>, AppError> {
        sqlx::query_as::<_, FanPhoto>("SELECT * FROM fan_photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError> {
        sqlx::query_as::<_, FanPhoto>("SELECT * FROM fan_photos ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_approved_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.fan_photos_with_status(PhotoStatus::Approved).await
    }

    async fn list_pending_fan_photos(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.fan_photos_with_status(PhotoStatus::Pending).await
    }

    async fn list_fan_photos_by_owner(&self, user_id: i64) -> Result<Vec<FanPhoto>, AppError> {
        sqlx::query_as::<_, FanPhoto>(
            "SELECT * FROM fan_photos WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn set_fan_photo_status(&self, id: i64, change: &StatusChange) -> Result<FanPhoto, AppError> {
        sqlx::query_as::<_, FanPhoto>(
            r#"
            UPDATE fan_photos
            SET status = $2, approved_by = $3, approved_at = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(change.status.as_str())
        .bind(&change.approved_by)
        .bind(change.approved_at)
        .bind(change.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Fan photo not found".into()))
    }

    async fn delete_fan_photo(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fan_photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fan photo not found".into()));
        }

        Ok(())
    }
}
