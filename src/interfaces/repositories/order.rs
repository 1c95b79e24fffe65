use async_trait::async_trait;

use crate::{
    entities::order::{Order, OrderInsert, OrderItem, OrderItemInsert},
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_order(&self, order: &OrderInsert) -> Result<Order, AppError>;
    async fn get_order_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;
    async fn list_orders(&self) -> Result<Vec<Order>, AppError>;
    async fn list_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, AppError>;
    async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, AppError>;
    async fn create_order_item(&self, item: &OrderItemInsert) -> Result<OrderItem, AppError>;
    async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, AppError>;
}
