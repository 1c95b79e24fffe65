use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::{
        order::{Order, OrderInsert, OrderItem, OrderItemInsert},
        product::{Product, ProductInsert, ProductUpdate},
    },
    errors::AppError,
    repositories::{order::OrderRepository, product::ProductRepository},
};

use super::PgStore;

#[async_trait]
impl ProductRepository for PgStore {
    async fn create_product(&self, product: &ProductInsert) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                name, description, price, category, stock_quantity,
                image_url, is_active, slug, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.stock_quantity)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(&product.slug)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                stock_quantity = COALESCE($6, stock_quantity),
                image_url = COALESCE($7, image_url),
                is_active = COALESCE($8, is_active),
                slug = COALESCE($9, slug),
                updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(&update.category)
        .bind(update.stock_quantity)
        .bind(&update.image_url)
        .bind(update.is_active)
        .bind(&update.slug)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".into()));
        }

        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PgStore {
    async fn create_order(&self, order: &OrderInsert) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                user_id, status, total_amount, shipping_address,
                payment_method, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(order.user_id)
        .bind(&order.status)
        .bind(order.total_amount)
        .bind(&order.shipping_address)
        .bind(&order.payment_method)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_order_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))
    }

    async fn create_order_item(&self, item: &OrderItemInsert) -> Result<OrderItem, AppError> {
        sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.price)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, AppError> {
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
