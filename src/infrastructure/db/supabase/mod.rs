//! Hosted backend: Postgres tables over PostgREST plus an object storage
//! bucket, reached with a service role key.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::{errors::AppError, repositories::storage::StoreLifecycle, settings::AppConfig};

mod accounts;
mod blob;
mod catalog;
mod gallery;
mod inbox;

pub use blob::SupabaseBlobStore;

pub(crate) const NEWEST_FIRST: &str = "created_at.desc,id.desc";

fn build_http_client(service_key: &str, timeout: Duration) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert("apikey", HeaderValue::from_str(service_key).context("Invalid service key")?);
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", service_key)).context("Invalid service key")?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .context("Could not build HTTP client")
}

/// Thin authenticated HTTP client shared by the table store and the blob store.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = build_http_client(service_key, timeout)?;

        Ok(SupabaseClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_service_role_key) else {
            return Err(AppError::InternalError("Hosted backend credentials are not configured".into()));
        };

        SupabaseClient::new(url, key, Duration::from_secs(config.http_timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Maps non-success responses onto the storage error contract.
pub(crate) async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::CONFLICT => AppError::Conflict("Record already exists".into()),
        s if s.is_server_error() => AppError::BackendUnavailable(format!("Hosted backend returned {}: {}", s, body)),
        s => AppError::InternalError(format!("Hosted backend returned {}: {}", s, body)),
    })
}

/// Partial update payload with a fresh `updated_at`.
#[derive(Serialize)]
pub(crate) struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    pub fields: &'a T,
    pub updated_at: DateTime<Utc>,
}

impl<'a, T: Serialize> Stamped<'a, T> {
    pub fn now(fields: &'a T) -> Self {
        Stamped { fields, updated_at: Utc::now() }
    }
}

/// Storage backed by the hosted REST service.
pub struct SupabaseStore {
    client: SupabaseClient,
    closed: AtomicBool,
}

impl SupabaseStore {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseStore {
            client,
            closed: AtomicBool::new(false),
        }
    }

    pub fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let client = SupabaseClient::from_config(config)?;
        info!("Hosted backend client ready for {}", client.base_url());
        Ok(SupabaseStore::new(client))
    }

    fn request(&self, builder: impl FnOnce(&reqwest::Client) -> RequestBuilder) -> Result<RequestBuilder, AppError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(AppError::BackendUnavailable("Hosted backend client is closed".into()));
        }
        Ok(builder(self.client.http()))
    }

    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let url = self.client.rest_url(table);
        let response = self
            .request(|http| http.get(url).query(&[("select", "*")]).query(query))?
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    pub(crate) async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &[(&str, String)],
    ) -> Result<Option<T>, AppError> {
        let mut query = filter.to_vec();
        query.push(("limit", "1".to_string()));
        Ok(self.select(table, &query).await?.into_iter().next())
    }

    pub(crate) async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.client.rest_url(table);
        let response = self
            .request(|http| http.post(url).header("Prefer", "return=representation").json(body))?
            .send()
            .await?;

        let rows: Vec<T> = check_status(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError(format!("Insert into {} returned no row", table)))
    }

    pub(crate) async fn upsert<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        on_conflict: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.client.rest_url(table);
        let response = self
            .request(|http| {
                http.post(url)
                    .query(&[("on_conflict", on_conflict)])
                    .header("Prefer", "resolution=merge-duplicates,return=representation")
                    .json(body)
            })?
            .send()
            .await?;

        let rows: Vec<T> = check_status(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError(format!("Upsert into {} returned no row", table)))
    }

    /// PATCH matching rows; `None` when nothing matched.
    pub(crate) async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        filter: &[(&str, String)],
        body: &B,
    ) -> Result<Option<T>, AppError> {
        let url = self.client.rest_url(table);
        let response = self
            .request(|http| {
                http.patch(url)
                    .query(filter)
                    .header("Prefer", "return=representation")
                    .json(body)
            })?
            .send()
            .await?;

        let rows: Vec<T> = check_status(response).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    /// Deletes matching rows and returns how many were removed.
    pub(crate) async fn delete_where(&self, table: &str, filter: &[(&str, String)]) -> Result<usize, AppError> {
        let url = self.client.rest_url(table);
        let response = self
            .request(|http| http.delete(url).query(filter).header("Prefer", "return=representation"))?
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = check_status(response).await?.json().await?;
        Ok(rows.len())
    }
}

pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl StoreLifecycle for SupabaseStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        let query = [("select", "id".to_string()), ("limit", "1".to_string())];
        let url = self.client.rest_url("fan_photos");
        let response = self.request(|http| http.get(url).query(&query))?.send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        info!("Hosted backend client closed.");
    }
}
