use async_trait::async_trait;

use crate::errors::AppError;

/// External object storage for uploaded images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, AppError>;
    /// Fails with `AppError::NotFound` when the object does not exist.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}
