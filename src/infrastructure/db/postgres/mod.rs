use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use std::time::Duration;

use crate::{errors::AppError, repositories::storage::StoreLifecycle, settings::AppConfig};

mod accounts;
mod catalog;
mod gallery;
mod inbox;

const MAX_CONNECT_RETRIES: u32 = 5;
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    loop {
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Postgres connection established.");
                return Ok(pool);
            }
            Err(e) if retry_count < MAX_CONNECT_RETRIES => {
                retry_count += 1;
                info!(
                    "Failed to connect to Postgres (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, MAX_CONNECT_RETRIES, e, wait_seconds
                );

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Storage backed by a PostgreSQL server.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Connects with retries and brings the schema up to date.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = create_pool(&config.database_url, config.max_db_connections).await?;
        let store = PgStore::new(pool);
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations/postgres").run(&self.pool).await?;
        info!("Postgres migrations applied.");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StoreLifecycle for PgStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Postgres pool closed.");
    }
}
