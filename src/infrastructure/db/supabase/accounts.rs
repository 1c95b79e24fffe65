use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use crate::{
    entities::{
        session::Session,
        user::{AdminUser, AdminUserUpsert, Customer, CustomerInsert, CustomerUpdate},
    },
    errors::AppError,
    repositories::{
        session::SessionRepository,
        user::{AdminUserRepository, CustomerRepository},
    },
};

use super::{eq, Stamped, SupabaseStore, NEWEST_FIRST};

fn now_filter(op: &str) -> String {
    format!("{}.{}", op, Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

#[async_trait]
impl CustomerRepository for SupabaseStore {
    async fn create_customer(&self, customer: &CustomerInsert) -> Result<Customer, AppError> {
        self.insert("users", customer).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("Username or email already in use".into()),
            other => other,
        })
    }

    async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        self.select_one("users", &[("id", eq(id))]).await
    }

    async fn get_customer_by_username(&self, username: &str) -> Result<Option<Customer>, AppError> {
        self.select_one("users", &[("username", eq(username))]).await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.select("users", &[("order", NEWEST_FIRST.to_string())]).await
    }

    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, AppError> {
        self.update("users", &[("id", eq(id))], &Stamped::now(update))
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".into()))
    }
}

#[async_trait]
impl AdminUserRepository for SupabaseStore {
    async fn get_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError> {
        self.select_one("admin_users", &[("id", eq(id))]).await
    }

    async fn upsert_admin_user(&self, admin: &AdminUserUpsert) -> Result<AdminUser, AppError> {
        self.upsert("admin_users", "id", admin).await
    }
}

#[async_trait]
impl SessionRepository for SupabaseStore {
    async fn create_session(&self, session: &Session) -> Result<(), AppError> {
        self.upsert::<Session, _>("sessions", "sid", session).await.map(|_| ())
    }

    async fn get_session(&self, sid: &str) -> Result<Option<Session>, AppError> {
        self.select_one("sessions", &[("sid", eq(sid)), ("expire", now_filter("gt"))]).await
    }

    async fn destroy_session(&self, sid: &str) -> Result<(), AppError> {
        self.delete_where("sessions", &[("sid", eq(sid))]).await.map(|_| ())
    }

    async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let removed = self.delete_where("sessions", &[("expire", now_filter("lte"))]).await?;
        Ok(removed as u64)
    }
}
