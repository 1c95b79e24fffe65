use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::user::{Customer, CustomerUpdate},
    errors::AppError,
    repositories::user::CustomerRepository,
};

pub struct CustomerHandler<R: ?Sized> {
    pub customer_repo: Arc<R>,
}

impl<R> CustomerHandler<R>
where
    R: CustomerRepository + ?Sized,
{
    pub fn new(customer_repo: Arc<R>) -> Self {
        CustomerHandler { customer_repo }
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.customer_repo.list_customers().await
    }

    pub async fn update_customer(&self, id: i64, mut update: CustomerUpdate) -> Result<Customer, AppError> {
        update.validate()?;
        update.email = update.email.map(|e| e.trim().to_lowercase());

        let customer = self
            .customer_repo
            .update_customer(id, &update)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Customer not found".to_string()),
                AppError::Conflict(_) => AppError::Conflict("Email already in use".to_string()),
                other => other,
            })?;

        tracing::info!(customer_id = id, "Customer updated");
        Ok(customer)
    }
}
