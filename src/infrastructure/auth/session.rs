use std::sync::Arc;

use actix_web::{cookie::time::Duration as CookieDuration, cookie::Cookie, HttpRequest};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sqlx::types::Json;
use tracing::{debug, warn};

use crate::{
    entities::{session::Session, token::Identity},
    errors::AppError,
    repositories::session::SessionRepository,
    settings::AppConfig,
};

use super::{credential_cookie, removal_cookie, AuthStrategy, IssuedCredential};

pub const SESSION_COOKIE: &str = "sid";
const SESSION_ID_LENGTH: usize = 48;

fn new_session_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Server-side sessions: the cookie holds an opaque id, the identity lives in
/// the `sessions` table.
pub struct SessionAuth<R: ?Sized> {
    sessions: Arc<R>,
    ttl: Duration,
    cookie_secure: bool,
}

impl<R> SessionAuth<R>
where
    R: SessionRepository + ?Sized,
{
    pub fn new(sessions: Arc<R>, config: &AppConfig) -> Self {
        SessionAuth {
            sessions,
            ttl: Duration::hours(config.session_ttl_hours),
            cookie_secure: config.cookie_secure,
        }
    }
}

#[async_trait]
impl<R> AuthStrategy for SessionAuth<R>
where
    R: SessionRepository + ?Sized + 'static,
{
    fn name(&self) -> &'static str {
        "session"
    }

    fn credential(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|sid| !sid.is_empty())
    }

    async fn resolve(&self, credential: &str) -> Result<Option<Identity>, AppError> {
        let session = match self.sessions.get_session(credential).await? {
            Some(session) if !session.is_expired(Utc::now()) => session,
            _ => {
                debug!("No live session for presented cookie");
                return Ok(None);
            }
        };

        match serde_json::from_value::<Identity>(session.sess.0) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!("Discarding unreadable session payload: {}", e);
                Ok(None)
            }
        }
    }

    async fn issue(&self, identity: &Identity) -> Result<IssuedCredential, AppError> {
        let sess = serde_json::to_value(identity)
            .map_err(|e| AppError::InternalError(format!("Session encoding failed: {}", e)))?;

        let session = Session {
            sid: new_session_id(),
            sess: Json(sess),
            expire: Utc::now() + self.ttl,
        };
        self.sessions.create_session(&session).await?;

        let max_age = CookieDuration::seconds(self.ttl.num_seconds());
        Ok(IssuedCredential {
            cookie: credential_cookie(SESSION_COOKIE, session.sid, max_age, self.cookie_secure),
            token: None,
        })
    }

    async fn revoke(&self, credential: Option<&str>) -> Result<Cookie<'static>, AppError> {
        if let Some(sid) = credential {
            self.sessions.destroy_session(sid).await?;
        }
        Ok(removal_cookie(SESSION_COOKIE, self.cookie_secure))
    }
}
