use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use tracing::debug;

use crate::{errors::AppError, repositories::blob::BlobStore, settings::AppConfig};

use super::{check_status, SupabaseClient};

/// Object storage bucket on the hosted backend.
#[derive(Clone)]
pub struct SupabaseBlobStore {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseBlobStore {
    pub fn new(client: SupabaseClient, bucket: &str) -> Self {
        SupabaseBlobStore {
            client,
            bucket: bucket.to_string(),
        }
    }

    /// `None` unless real hosted credentials are configured.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, AppError> {
        if !config.supabase_configured() {
            return Ok(None);
        }

        let client = SupabaseClient::from_config(config)?;
        Ok(Some(SupabaseBlobStore::new(client, &config.supabase_bucket)))
    }

    pub fn public_url(&self, key: &str) -> String {
        self.client
            .storage_url(&format!("object/public/{}/{}", self.bucket, key))
    }
}

#[async_trait]
impl BlobStore for SupabaseBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, AppError> {
        let url = self.client.storage_url(&format!("object/{}/{}", self.bucket, key));

        let response = self
            .client
            .http()
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        check_status(response).await?;
        debug!("Uploaded object {} to bucket {}", key, self.bucket);

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let url = self.client.storage_url(&format!("object/{}", self.bucket));

        let response = self
            .client
            .http()
            .delete(url)
            .json(&json!({ "prefixes": [key] }))
            .send()
            .await?;

        let removed: Vec<Value> = check_status(response).await?.json().await?;
        if removed.is_empty() {
            return Err(AppError::NotFound(format!("Stored object {}", key)));
        }

        Ok(())
    }
}
