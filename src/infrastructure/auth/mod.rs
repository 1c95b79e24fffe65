use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    HttpRequest,
};
use async_trait::async_trait;

use crate::{entities::token::Identity, errors::AppError};

pub mod jwt;
pub mod password;
pub mod session;

/// What a successful login hands back to the client.
#[derive(Debug)]
pub struct IssuedCredential {
    pub cookie: Cookie<'static>,
    /// Bearer token for clients that cannot keep cookies. Session auth has none.
    pub token: Option<String>,
}

/// How callers prove who they are. One implementation is chosen at startup.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Raw credential carried by the request, if any.
    fn credential(&self, req: &HttpRequest) -> Option<String>;

    /// Unknown, expired or tampered credentials resolve to `None`.
    async fn resolve(&self, credential: &str) -> Result<Option<Identity>, AppError>;

    async fn issue(&self, identity: &Identity) -> Result<IssuedCredential, AppError>;

    /// Invalidates the credential where the strategy keeps state, and returns
    /// a cookie that clears it on the client.
    async fn revoke(&self, credential: Option<&str>) -> Result<Cookie<'static>, AppError>;
}

pub async fn authenticate(strategy: &dyn AuthStrategy, req: &HttpRequest) -> Result<Option<Identity>, AppError> {
    match strategy.credential(req) {
        Some(credential) => strategy.resolve(&credential).await,
        None => Ok(None),
    }
}

pub(crate) fn credential_cookie(
    name: &'static str,
    value: String,
    max_age: CookieDuration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

pub(crate) fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = credential_cookie(name, String::new(), CookieDuration::ZERO, secure);
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_cookie_is_http_only_and_site_wide() {
        let cookie = credential_cookie("sid", "abc".into(), CookieDuration::hours(1), true);

        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(CookieDuration::hours(1)));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie("auth_token", false);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
