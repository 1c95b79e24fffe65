use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::{
    entities::{
        order::{Order, OrderInsert, OrderItem, OrderItemInsert},
        product::{Product, ProductInsert, ProductUpdate},
    },
    errors::AppError,
    repositories::{order::OrderRepository, product::ProductRepository},
};

use super::{eq, Stamped, SupabaseStore, NEWEST_FIRST};

#[async_trait]
impl ProductRepository for SupabaseStore {
    async fn create_product(&self, product: &ProductInsert) -> Result<Product, AppError> {
        self.insert("products", product).await
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.select_one("products", &[("id", eq(id))]).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.select("products", &[("order", NEWEST_FIRST.to_string())]).await
    }

    async fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, AppError> {
        self.update("products", &[("id", eq(id))], &Stamped::now(update))
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        match self.delete_where("products", &[("id", eq(id))]).await? {
            0 => Err(AppError::NotFound("Product not found".into())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl OrderRepository for SupabaseStore {
    async fn create_order(&self, order: &OrderInsert) -> Result<Order, AppError> {
        self.insert("orders", order).await
    }

    async fn get_order_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        self.select_one("orders", &[("id", eq(id))]).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.select("orders", &[("order", NEWEST_FIRST.to_string())]).await
    }

    async fn list_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        self.select(
            "orders",
            &[("user_id", eq(user_id)), ("order", NEWEST_FIRST.to_string())],
        )
        .await
    }

    async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, AppError> {
        let body = json!({ "status": status, "updated_at": Utc::now() });
        self.update("orders", &[("id", eq(id))], &body)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))
    }

    async fn create_order_item(&self, item: &OrderItemInsert) -> Result<OrderItem, AppError> {
        self.insert("order_items", item).await
    }

    async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, AppError> {
        self.select(
            "order_items",
            &[("order_id", eq(order_id)), ("order", "id.asc".to_string())],
        )
        .await
    }
}
