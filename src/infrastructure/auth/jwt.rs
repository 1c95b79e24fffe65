use actix_web::{cookie::time::Duration as CookieDuration, cookie::Cookie, http::header, HttpRequest};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};
use tracing::debug;

use crate::{
    entities::token::{Claims, Identity},
    errors::{AppError, AuthError},
    settings::{AppConfig, JwtKeys},
};

use super::{credential_cookie, removal_cookie, AuthStrategy, IssuedCredential};

pub const AUTH_COOKIE: &str = "auth_token";
const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Stateless auth: the identity travels inside a signed token.
#[derive(Clone)]
pub struct JwtAuth {
    keys: JwtKeys,
    expiration: Duration,
    cookie_secure: bool,
}

impl JwtAuth {
    pub fn new(config: &AppConfig) -> Self {
        JwtAuth {
            keys: JwtKeys::from(config),
            expiration: Duration::minutes(config.jwt_expiration_minutes),
            cookie_secure: config.cookie_secure,
        }
    }

    pub fn create_jwt(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();

        let claims = Claims {
            sub: identity.subject.clone(),
            username: identity.username.clone(),
            uid: identity.user_id,
            admin: identity.is_admin,
            exp: (now + self.expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(|e| {
            tracing::warn!("Failed to create JWT: {}", e);
            AuthError::TokenCreation
        })
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }

    fn cookie_max_age(&self) -> CookieDuration {
        CookieDuration::seconds(self.expiration.num_seconds())
    }
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let parts: Vec<&str> = value.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

#[async_trait]
impl AuthStrategy for JwtAuth {
    fn name(&self) -> &'static str {
        "jwt"
    }

    fn credential(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(AUTH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
            .or_else(|| bearer_token(req))
    }

    async fn resolve(&self, credential: &str) -> Result<Option<Identity>, AppError> {
        match self.decode_jwt(credential) {
            Ok(data) => Ok(Some(Identity::from(data.claims))),
            Err(e) => {
                debug!("Rejected token: {}", e);
                Ok(None)
            }
        }
    }

    async fn issue(&self, identity: &Identity) -> Result<IssuedCredential, AppError> {
        let token = self.create_jwt(identity)?;
        let cookie: Cookie<'static> =
            credential_cookie(AUTH_COOKIE, token.clone(), self.cookie_max_age(), self.cookie_secure);

        Ok(IssuedCredential {
            cookie,
            token: Some(token),
        })
    }

    async fn revoke(&self, _credential: Option<&str>) -> Result<Cookie<'static>, AppError> {
        Ok(removal_cookie(AUTH_COOKIE, self.cookie_secure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn jwt_auth() -> JwtAuth {
        let config = AppConfig {
            jwt_secret: "a-test-secret-that-is-long-enough-for-hs512".into(),
            jwt_expiration_minutes: 30,
            ..AppConfig::default()
        };
        JwtAuth::new(&config)
    }

    #[test]
    fn token_carries_identity() {
        let auth = jwt_auth();
        let identity = Identity::customer(7, "fan_seven");

        let token = auth.create_jwt(&identity).unwrap();
        let claims = auth.decode_jwt(&token).unwrap().claims;

        assert_eq!(claims.sub, "user:7");
        assert_eq!(claims.uid, Some(7));
        assert!(!claims.admin);
        assert_eq!(Identity::from(claims), identity);
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = jwt_auth();
        let past = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let claims = Claims {
            sub: "admin:root".into(),
            username: "root".into(),
            uid: None,
            admin: true,
            exp: past,
            iat: past,
        };
        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &auth.keys.encoding).unwrap();

        assert!(matches!(auth.decode_jwt(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_another_secret_is_invalid() {
        let other = JwtAuth::new(&AppConfig {
            jwt_secret: "a-completely-different-secret-of-decent-length".into(),
            ..AppConfig::default()
        });
        let token = other.create_jwt(&Identity::admin("root")).unwrap();

        assert!(matches!(jwt_auth().decode_jwt(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn credential_prefers_cookie_then_bearer_header() {
        let auth = jwt_auth();

        let from_cookie = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE, "cookie-token"))
            .insert_header((header::AUTHORIZATION, "Bearer header-token"))
            .to_http_request();
        assert_eq!(auth.credential(&from_cookie).as_deref(), Some("cookie-token"));

        let from_header = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "bearer header-token"))
            .to_http_request();
        assert_eq!(auth.credential(&from_header).as_deref(), Some("header-token"));

        let malformed = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token header-token"))
            .to_http_request();
        assert_eq!(auth.credential(&malformed), None);
    }

    #[actix_rt::test]
    async fn issued_token_resolves_back_to_identity() {
        let auth = jwt_auth();
        let identity = Identity::admin("root");

        let issued = auth.issue(&identity).await.unwrap();
        assert_eq!(issued.cookie.name(), AUTH_COOKIE);

        let token = issued.token.unwrap();
        assert_eq!(auth.resolve(&token).await.unwrap(), Some(identity));
        assert_eq!(auth.resolve("garbage").await.unwrap(), None);
    }
}
