use async_trait::async_trait;

use crate::{entities::session::Session, errors::AppError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &Session) -> Result<(), AppError>;
    /// Expired sessions are treated as absent.
    async fn get_session(&self, sid: &str) -> Result<Option<Session>, AppError>;
    async fn destroy_session(&self, sid: &str) -> Result<(), AppError>;
    async fn purge_expired_sessions(&self) -> Result<u64, AppError>;
}
