use async_trait::async_trait;

use crate::{
    entities::user::{AdminUser, AdminUserUpsert, Customer, CustomerInsert, CustomerUpdate},
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create_customer(&self, customer: &CustomerInsert) -> Result<Customer, AppError>;
    async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;
    async fn get_customer_by_username(&self, username: &str) -> Result<Option<Customer>, AppError>;
    async fn list_customers(&self) -> Result<Vec<Customer>, AppError>;
    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn get_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError>;
    /// Inserts the admin or refreshes the existing row with the same id.
    async fn upsert_admin_user(&self, admin: &AdminUserUpsert) -> Result<AdminUser, AppError>;
}
