use async_trait::async_trait;

use crate::errors::AppError;

use super::{
    analytics::AnalyticsRepository,
    contact_message::ContactMessageRepository,
    fan_photo::FanPhotoRepository,
    order::OrderRepository,
    product::ProductRepository,
    session::SessionRepository,
    user::{AdminUserRepository, CustomerRepository},
};

#[async_trait]
pub trait StoreLifecycle: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    /// Releases the pool or client. Later calls fail as backend unavailable.
    async fn close(&self);
}

/// Everything one persistence backend provides.
pub trait Storage:
    FanPhotoRepository
    + ProductRepository
    + CustomerRepository
    + AdminUserRepository
    + OrderRepository
    + ContactMessageRepository
    + AnalyticsRepository
    + SessionRepository
    + StoreLifecycle
{
}

impl<T> Storage for T where
    T: FanPhotoRepository
        + ProductRepository
        + CustomerRepository
        + AdminUserRepository
        + OrderRepository
        + ContactMessageRepository
        + AnalyticsRepository
        + SessionRepository
        + StoreLifecycle
{
}
