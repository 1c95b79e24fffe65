use std::sync::Arc;

use actix_web::cookie::Cookie;
use validator::Validate;
use zeroize::Zeroizing;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthStrategy, IssuedCredential};
use crate::entities::token::{AuthResponse, Identity};
use crate::entities::user::{AdminUserUpsert, LoginRequest, RegisterRequest};
use crate::errors::{AppError, AuthError};
use crate::repositories::user::{AdminUserRepository, CustomerRepository};
use crate::settings::AppConfig;

/// Credentials of the administrator configured through the environment.
struct BootstrapAdmin {
    username: String,
    password: Zeroizing<String>,
}

/// Response body plus the cookie the route layer attaches to it.
#[derive(Debug)]
pub struct LoginOutcome {
    pub response: AuthResponse,
    pub cookie: Cookie<'static>,
}

impl LoginOutcome {
    fn new(user: Identity, credential: IssuedCredential) -> Self {
        LoginOutcome {
            response: AuthResponse {
                user,
                token: credential.token,
            },
            cookie: credential.cookie,
        }
    }
}

pub struct AuthHandler<R: ?Sized> {
    pub accounts: Arc<R>,
    pub strategy: Arc<dyn AuthStrategy>,
    bootstrap_admin: Option<BootstrapAdmin>,
}

impl<R> AuthHandler<R>
where
    R: CustomerRepository + AdminUserRepository + ?Sized,
{
    pub fn new(accounts: Arc<R>, strategy: Arc<dyn AuthStrategy>, config: &AppConfig) -> Self {
        let bootstrap_admin = match (&config.admin_username, &config.admin_password) {
            (Some(username), Some(password)) => Some(BootstrapAdmin {
                username: username.trim().to_string(),
                password: Zeroizing::new(password.clone()),
            }),
            _ => None,
        };

        AuthHandler {
            accounts,
            strategy,
            bootstrap_admin,
        }
    }

    /// Logs in the configured administrator or an active customer.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AppError> {
        request.validate()?;
        let username = request.username.trim();

        if let Some(admin) = &self.bootstrap_admin {
            if admin.username == username {
                if admin.password.as_str() != request.password {
                    tracing::warn!("Failed admin login attempt for {}", username);
                    return Err(AuthError::WrongCredentials.into());
                }

                self.accounts
                    .upsert_admin_user(&AdminUserUpsert::bootstrap(username))
                    .await?;

                let identity = Identity::admin(username);
                let credential = self.strategy.issue(&identity).await?;
                tracing::info!("Admin {} logged in", username);
                return Ok(LoginOutcome::new(identity, credential));
            }
        }

        let customer = self
            .accounts
            .get_customer_by_username(username)
            .await?
            .ok_or(AuthError::WrongCredentials)?;

        if !verify_password(&request.password, &customer.password).map_err(|e| {
            tracing::warn!("Unreadable password hash for customer {}: {}", customer.id, e);
            AuthError::WrongCredentials
        })? {
            return Err(AuthError::WrongCredentials.into());
        }

        if !customer.is_active {
            return Err(AuthError::AccountDisabled.into());
        }

        let identity = Identity::customer(customer.id, &customer.username);
        let credential = self.strategy.issue(&identity).await?;

        tracing::info!("Customer {} logged in", customer.id);
        Ok(LoginOutcome::new(identity, credential))
    }

    /// Creates a customer account and logs it in.
    pub async fn register(&self, request: RegisterRequest) -> Result<LoginOutcome, AppError> {
        request.validate()?;

        if self
            .bootstrap_admin
            .as_ref()
            .is_some_and(|admin| admin.username == request.username.trim())
        {
            return Err(AppError::Conflict("Username already in use".to_string()));
        }

        let hashed_password = hash_password(&request.password)?;
        let insert = request.prepare_for_insert(hashed_password);
        let customer = self.accounts.create_customer(&insert).await?;

        let identity = Identity::customer(customer.id, &customer.username);
        let credential = self.strategy.issue(&identity).await?;

        tracing::info!("Customer {} registered", customer.id);
        Ok(LoginOutcome::new(identity, credential))
    }

    /// Returns the cookie that clears the client's credential.
    pub async fn logout(&self, credential: Option<String>) -> Result<Cookie<'static>, AppError> {
        self.strategy.revoke(credential.as_deref()).await
    }
}
