use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    entities::{
        fan_photo::{FanPhoto, FanPhotoActionResponse, FanPhotoInsert, NewFanPhotoRequest, PhotoStatus, StatusChange},
        token::Identity,
    },
    errors::AppError,
    repositories::{blob::BlobStore, fan_photo::FanPhotoRepository},
    utils::{data_url::DataUrl, sanitize::clean_text},
};

const BLOB_KEY_PREFIX: &str = "fan-photos";
const BLOB_KEY_RANDOM_LENGTH: usize = 8;

/// `fan-photos/<unix-millis>-<random>.<ext>`
pub fn blob_key(extension: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BLOB_KEY_RANDOM_LENGTH)
        .map(char::from)
        .collect();

    format!(
        "{}/{}-{}.{}",
        BLOB_KEY_PREFIX,
        Utc::now().timestamp_millis(),
        suffix.to_lowercase(),
        extension
    )
}

/// Fan photo submission and moderation.
pub struct GalleryHandler<R: ?Sized> {
    pub photo_repo: Arc<R>,
    pub blob_store: Option<Arc<dyn BlobStore>>,
}

impl<R> GalleryHandler<R>
where
    R: FanPhotoRepository + ?Sized,
{
    pub fn new(photo_repo: Arc<R>, blob_store: Option<Arc<dyn BlobStore>>) -> Self {
        GalleryHandler { photo_repo, blob_store }
    }

    /// Stores a new pending photo for the calling customer.
    ///
    /// Inline image data goes to the blob store when one is configured. If
    /// there is none, or the upload fails, the data URL itself becomes the
    /// image URL.
    pub async fn submit_photo(
        &self,
        submitter: &Identity,
        request: NewFanPhotoRequest,
    ) -> Result<FanPhotoActionResponse, AppError> {
        request.validate()?;

        let user_id = submitter.user_id.ok_or(AppError::UnauthorizedAccess)?;
        let caption = clean_text(request.caption.as_deref());

        let (image_url, storage_key) = match request.image_data.as_deref().map(str::trim) {
            Some(data) if !data.is_empty() => self.store_inline_image(data).await?,
            _ => {
                let url = request
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
                (url, None)
            }
        };

        let insert = FanPhotoInsert::pending(Some(user_id), image_url, storage_key, caption);
        let photo = self.photo_repo.create_fan_photo(&insert).await?;

        info!(photo_id = photo.id, user_id, name = ?request.name, "Fan photo submitted");
        Ok(FanPhotoActionResponse::with_photo(
            "Photo submitted! Awaiting approval.",
            photo,
        ))
    }

    async fn store_inline_image(&self, data: &str) -> Result<(String, Option<String>), AppError> {
        let Some(blob_store) = &self.blob_store else {
            return Ok((data.to_string(), None));
        };

        let decoded = DataUrl::parse(data).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let key = blob_key(decoded.extension());

        match blob_store.upload(&key, decoded.bytes, &decoded.mime_type).await {
            Ok(public_url) => Ok((public_url, Some(key))),
            Err(e) => {
                warn!("Image upload failed, keeping inline data instead: {}", e);
                Ok((data.to_string(), None))
            }
        }
    }

    pub async fn list_approved(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.photo_repo.list_approved_fan_photos().await
    }

    pub async fn list_all(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.photo_repo.list_fan_photos().await
    }

    pub async fn list_pending(&self) -> Result<Vec<FanPhoto>, AppError> {
        self.photo_repo.list_pending_fan_photos().await
    }

    /// Photos submitted by the caller, whatever their status.
    pub async fn list_own(&self, owner: &Identity) -> Result<Vec<FanPhoto>, AppError> {
        let user_id = owner.user_id.ok_or(AppError::UnauthorizedAccess)?;
        self.photo_repo.list_fan_photos_by_owner(user_id).await
    }

    pub async fn approve_photo(&self, id: i64, moderator: &Identity) -> Result<FanPhotoActionResponse, AppError> {
        let photo = self.moderate(id, PhotoStatus::Approved, moderator).await?;
        Ok(FanPhotoActionResponse::with_photo("Photo approved successfully!", photo))
    }

    pub async fn reject_photo(&self, id: i64, moderator: &Identity) -> Result<FanPhotoActionResponse, AppError> {
        let photo = self.moderate(id, PhotoStatus::Rejected, moderator).await?;
        Ok(FanPhotoActionResponse::with_photo("Photo rejected successfully!", photo))
    }

    async fn moderate(&self, id: i64, status: PhotoStatus, moderator: &Identity) -> Result<FanPhoto, AppError> {
        let change = StatusChange::new(status, moderator.moderator(), Utc::now());

        let photo = self
            .photo_repo
            .set_fan_photo_status(id, &change)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Fan photo not found".to_string()),
                other => other,
            })?;

        info!(photo_id = id, status = %status, moderator = moderator.moderator(), "Fan photo moderated");
        Ok(photo)
    }

    /// Removes the metadata row, then cleans up the stored object in the
    /// background. The returned handle is only useful to callers that want
    /// to wait for the cleanup.
    pub async fn delete_photo(&self, id: i64) -> Result<Option<JoinHandle<()>>, AppError> {
        let photo = self
            .photo_repo
            .get_fan_photo_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fan photo not found".to_string()))?;

        self.photo_repo.delete_fan_photo(id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Fan photo not found".to_string()),
            other => other,
        })?;
        info!(photo_id = id, "Fan photo deleted");

        let (Some(key), Some(blob_store)) = (photo.storage_key, self.blob_store.clone()) else {
            return Ok(None);
        };

        let cleanup = tokio::spawn(async move {
            match blob_store.delete(&key).await {
                Ok(()) => info!("Removed stored image {}", key),
                Err(e) => warn!("Could not remove stored image {}: {}", key, e),
            }
        });

        Ok(Some(cleanup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{blob::MockBlobStore, fan_photo::MockFanPhotoRepository};

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn stored(insert: &FanPhotoInsert, id: i64) -> FanPhoto {
        FanPhoto {
            id,
            user_id: insert.user_id,
            image_url: insert.image_url.clone(),
            storage_key: insert.storage_key.clone(),
            caption: insert.caption.clone(),
            status: insert.status,
            approved_by: None,
            approved_at: None,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }

    fn photo(id: i64, storage_key: Option<&str>) -> FanPhoto {
        let insert = FanPhotoInsert::pending(
            Some(7),
            "https://cdn.example.com/a.png".into(),
            storage_key.map(str::to_string),
            None,
        );
        stored(&insert, id)
    }

    fn inline_request() -> NewFanPhotoRequest {
        NewFanPhotoRequest {
            name: Some("me.png".into()),
            caption: Some("<b>Front row</b>".into()),
            image_url: None,
            image_data: Some(PIXEL.into()),
        }
    }

    fn handler(repo: MockFanPhotoRepository, blob: Option<MockBlobStore>) -> GalleryHandler<MockFanPhotoRepository> {
        GalleryHandler::new(Arc::new(repo), blob.map(|b| Arc::new(b) as Arc<dyn BlobStore>))
    }

    #[test]
    fn blob_keys_follow_naming_scheme() {
        let key = blob_key("png");
        let name = key.strip_prefix("fan-photos/").unwrap();
        let (millis, rest) = name.split_once('-').unwrap();

        assert!(millis.parse::<i64>().is_ok());
        assert!(rest.ends_with(".png"));
        assert_eq!(rest.len(), BLOB_KEY_RANDOM_LENGTH + ".png".len());
    }

    #[tokio::test]
    async fn submission_is_pending_and_owned_by_submitter() {
        let mut repo = MockFanPhotoRepository::new();
        repo.expect_create_fan_photo()
            .withf(|insert| {
                insert.user_id == Some(7)
                    && insert.status == PhotoStatus::Pending
                    && insert.caption.as_deref() == Some("Front row")
            })
            .times(1)
            .returning(|insert| Ok(stored(insert, 1)));

        let response = handler(repo, None)
            .submit_photo(&Identity::customer(7, "fan_seven"), inline_request())
            .await
            .unwrap();

        let photo = response.photo.unwrap();
        assert!(response.success);
        assert_eq!(photo.status, PhotoStatus::Pending);
        assert_eq!(photo.image_url, PIXEL);
        assert!(photo.storage_key.is_none());
    }

    #[tokio::test]
    async fn uploaded_image_stores_public_url_and_key() {
        let mut blob = MockBlobStore::new();
        blob.expect_upload()
            .withf(|key, bytes, content_type| {
                key.starts_with("fan-photos/") && key.ends_with(".png") && !bytes.is_empty() && content_type == "image/png"
            })
            .times(1)
            .returning(|key, _, _| Ok(format!("https://cdn.example.com/{}", key)));

        let mut repo = MockFanPhotoRepository::new();
        repo.expect_create_fan_photo()
            .withf(|insert| {
                insert.storage_key.is_some() && insert.image_url.starts_with("https://cdn.example.com/fan-photos/")
            })
            .times(1)
            .returning(|insert| Ok(stored(insert, 2)));

        let response = handler(repo, Some(blob))
            .submit_photo(&Identity::customer(7, "fan_seven"), inline_request())
            .await
            .unwrap();

        assert!(response.photo.unwrap().storage_key.is_some());
    }

    #[tokio::test]
    async fn failed_upload_falls_back_to_inline_data() {
        let mut blob = MockBlobStore::new();
        blob.expect_upload()
            .returning(|_, _, _| Err(AppError::BackendUnavailable("bucket offline".into())));

        let mut repo = MockFanPhotoRepository::new();
        repo.expect_create_fan_photo()
            .withf(|insert| insert.storage_key.is_none() && insert.image_url == PIXEL)
            .times(1)
            .returning(|insert| Ok(stored(insert, 3)));

        let response = handler(repo, Some(blob))
            .submit_photo(&Identity::customer(7, "fan_seven"), inline_request())
            .await;

        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn mislabelled_image_is_keyed_by_its_real_format() {
        let png_bytes = PIXEL.split_once(',').unwrap().1;
        let mut request = inline_request();
        request.image_data = Some(format!("data:image/x/../../avatars/admin;base64,{}", png_bytes));

        let mut blob = MockBlobStore::new();
        blob.expect_upload()
            .withf(|key, _, content_type| {
                let name = key.strip_prefix("fan-photos/").unwrap_or_default();
                !name.is_empty() && !name.contains('/') && !key.contains("..") && key.ends_with(".png")
                    && content_type == "image/png"
            })
            .times(1)
            .returning(|key, _, _| Ok(format!("https://cdn.example.com/{}", key)));

        let mut repo = MockFanPhotoRepository::new();
        repo.expect_create_fan_photo()
            .times(1)
            .returning(|insert| Ok(stored(insert, 4)));

        let response = handler(repo, Some(blob))
            .submit_photo(&Identity::customer(7, "fan_seven"), request)
            .await
            .unwrap();

        assert!(response.photo.unwrap().storage_key.unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn unrecognised_image_bytes_are_rejected_before_upload() {
        let mut request = inline_request();
        request.image_data = Some("data:image/x/../../avatars/admin;base64,aGVsbG8gd29ybGQ=".into());

        let result = handler(MockFanPhotoRepository::new(), Some(MockBlobStore::new()))
            .submit_photo(&Identity::customer(7, "fan_seven"), request)
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn submission_without_customer_id_is_unauthorized() {
        let repo = MockFanPhotoRepository::new();

        let result = handler(repo, None)
            .submit_photo(&Identity::admin("root"), inline_request())
            .await;

        assert!(matches!(result, Err(AppError::UnauthorizedAccess)));
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_storage() {
        let repo = MockFanPhotoRepository::new();
        let request = NewFanPhotoRequest {
            name: None,
            caption: None,
            image_url: None,
            image_data: None,
        };

        let result = handler(repo, None)
            .submit_photo(&Identity::customer(7, "fan_seven"), request)
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn approval_records_moderator() {
        let mut repo = MockFanPhotoRepository::new();
        repo.expect_set_fan_photo_status()
            .withf(|id, change| {
                *id == 5
                    && change.status == PhotoStatus::Approved
                    && change.approved_by.as_deref() == Some("root")
                    && change.approved_at.is_some()
            })
            .times(1)
            .returning(|id, change| {
                let mut updated = photo(id, None);
                updated.status = change.status;
                updated.approved_by = change.approved_by.clone();
                updated.approved_at = change.approved_at;
                Ok(updated)
            });

        let response = handler(repo, None)
            .approve_photo(5, &Identity::admin("root"))
            .await
            .unwrap();

        assert_eq!(response.photo.unwrap().approved_by.as_deref(), Some("root"));
    }

    #[tokio::test]
    async fn rejecting_missing_photo_is_not_found() {
        let mut repo = MockFanPhotoRepository::new();
        repo.expect_set_fan_photo_status()
            .returning(|_, _| Err(AppError::NotFound("Record".into())));

        let result = handler(repo, None).reject_photo(404, &Identity::admin("root")).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Fan photo not found"));
    }

    #[tokio::test]
    async fn delete_succeeds_even_when_blob_is_already_gone() {
        let mut repo = MockFanPhotoRepository::new();
        repo.expect_get_fan_photo_by_id()
            .returning(|id| Ok(Some(photo(id, Some("fan-photos/1-abc.png")))));
        repo.expect_delete_fan_photo().times(1).returning(|_| Ok(()));

        let mut blob = MockBlobStore::new();
        blob.expect_delete()
            .withf(|key| key == "fan-photos/1-abc.png")
            .times(1)
            .returning(|key| Err(AppError::NotFound(format!("Stored object {}", key))));

        let cleanup = handler(repo, Some(blob)).delete_photo(9).await.unwrap();

        cleanup.expect("cleanup task").await.unwrap();
    }

    #[tokio::test]
    async fn delete_without_storage_key_skips_cleanup() {
        let mut repo = MockFanPhotoRepository::new();
        repo.expect_get_fan_photo_by_id().returning(|id| Ok(Some(photo(id, None))));
        repo.expect_delete_fan_photo().times(1).returning(|_| Ok(()));

        let blob = MockBlobStore::new();

        let cleanup = handler(repo, Some(blob)).delete_photo(9).await.unwrap();
        assert!(cleanup.is_none());
    }

    #[tokio::test]
    async fn deleting_missing_photo_is_not_found() {
        let mut repo = MockFanPhotoRepository::new();
        repo.expect_get_fan_photo_by_id().returning(|_| Ok(None));

        let result = handler(repo, None).delete_photo(9).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
