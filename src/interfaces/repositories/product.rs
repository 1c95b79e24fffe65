use async_trait::async_trait;

use crate::{
    entities::product::{Product, ProductInsert, ProductUpdate},
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: &ProductInsert) -> Result<Product, AppError>;
    async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    async fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, AppError>;
    async fn delete_product(&self, id: i64) -> Result<(), AppError>;
}
