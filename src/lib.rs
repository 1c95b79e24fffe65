use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, password, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, utils};

use auth::{jwt::JwtAuth, session::SessionAuth, AuthStrategy};
use db::{postgres::PgStore, sqlite::SqliteStore, supabase::{SupabaseBlobStore, SupabaseStore}};
use errors::AppError;
use repositories::{blob::BlobStore, storage::Storage};
use settings::{AppConfig, AuthMode, StorageBackend};
use use_cases::{
    analytics::AnalyticsHandler, auth::AuthHandler, catalog::CatalogHandler, contact::ContactHandler,
    customers::CustomerHandler, gallery::GalleryHandler, orders::OrderHandler, stats::StatsHandler,
};

pub type AppAuthHandler = AuthHandler<dyn Storage>;
pub type AppGalleryHandler = GalleryHandler<dyn Storage>;
pub type AppCatalogHandler = CatalogHandler<dyn Storage>;
pub type AppOrderHandler = OrderHandler<dyn Storage>;
pub type AppContactHandler = ContactHandler<dyn Storage>;
pub type AppAnalyticsHandler = AnalyticsHandler<dyn Storage>;
pub type AppCustomerHandler = CustomerHandler<dyn Storage>;
pub type AppStatsHandler = StatsHandler<dyn Storage>;

pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub backend: StorageBackend,
    pub auth_strategy: Arc<dyn AuthStrategy>,
    pub auth_handler: AppAuthHandler,
    pub gallery_handler: AppGalleryHandler,
    pub catalog_handler: AppCatalogHandler,
    pub order_handler: AppOrderHandler,
    pub contact_handler: AppContactHandler,
    pub analytics_handler: AppAnalyticsHandler,
    pub customer_handler: AppCustomerHandler,
    pub stats_handler: AppStatsHandler,
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// Wires every handler to one already-connected store.
    pub fn from_store(store: Arc<dyn Storage>, blob_store: Option<Arc<dyn BlobStore>>, config: &AppConfig) -> Self {
        let auth_strategy: Arc<dyn AuthStrategy> = match config.auth_mode() {
            AuthMode::Session => Arc::new(SessionAuth::new(store.clone(), config)),
            AuthMode::Jwt => Arc::new(JwtAuth::new(config)),
        };

        AppState {
            backend: config.storage_backend(),
            auth_handler: AuthHandler::new(store.clone(), auth_strategy.clone(), config),
            gallery_handler: GalleryHandler::new(store.clone(), blob_store),
            catalog_handler: CatalogHandler::new(store.clone()),
            order_handler: OrderHandler::new(store.clone()),
            contact_handler: ContactHandler::new(store.clone()),
            analytics_handler: AnalyticsHandler::new(store.clone()),
            customer_handler: CustomerHandler::new(store.clone()),
            stats_handler: StatsHandler::new(store.clone()),
            trust_forwarded_for: config.trust_x_forwarded_for,
            auth_strategy,
            store,
        }
    }
}

/// Connects the configured backend once and builds the shared state around it.
pub async fn build_state(config: &AppConfig) -> Result<AppState, AppError> {
    let store: Arc<dyn Storage> = match config.storage_backend() {
        StorageBackend::Sqlite => Arc::new(SqliteStore::connect(config).await?),
        StorageBackend::Postgres => Arc::new(PgStore::connect(config).await?),
        StorageBackend::Supabase => Arc::new(SupabaseStore::connect(config)?),
    };

    let blob_store = SupabaseBlobStore::from_config(config)?.map(|blob| Arc::new(blob) as Arc<dyn BlobStore>);
    if blob_store.is_none() {
        tracing::info!("No blob store configured, fan photos will be stored inline");
    }

    let state = AppState::from_store(store, blob_store, config);
    tracing::info!(
        backend = state.backend.as_str(),
        auth = state.auth_strategy.name(),
        "Application state ready"
    );
    Ok(state)
}
