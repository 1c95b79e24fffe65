use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::{errors::AppError, repositories::storage::StoreLifecycle, settings::AppConfig};

mod accounts;
mod catalog;
mod gallery;
mod inbox;


const ACQUIRE_TIMEOUT_SECS: u64 = 10;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect_with(options)
        .await?;

    info!("SQLite database opened.");
    Ok(pool)
}

/// Storage backed by an embedded SQLite file.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = create_pool(&config.database_url, config.max_db_connections).await?;
        let store = SqliteStore::new(pool);
        store.run_migrations().await?;
        Ok(store)
    }

    /// Private in-memory database with the schema applied.
    ///
    /// A single connection that is never recycled keeps the database alive
    /// for as long as the pool is open.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = SqliteStore::new(pool);
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await?;
        info!("SQLite migrations applied.");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StoreLifecycle for SqliteStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("SQLite pool closed.");
    }
}
