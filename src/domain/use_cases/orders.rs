use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    entities::{
        order::{
            NewOrderRequest, Order, OrderDetails, OrderInsert, OrderItemInsert, OrderStatusUpdate,
            DEFAULT_ORDER_STATUS,
        },
        product::Product,
        token::Identity,
    },
    errors::AppError,
    repositories::{order::OrderRepository, product::ProductRepository},
    utils::sanitize::clean_text,
};

fn order_not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Order not found".to_string()),
        other => other,
    }
}

pub struct OrderHandler<R: ?Sized> {
    pub repo: Arc<R>,
}

impl<R> OrderHandler<R>
where
    R: OrderRepository + ProductRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        OrderHandler { repo }
    }

    /// Places an order for the calling customer. Line prices are taken from
    /// the catalog at the time of ordering.
    pub async fn place_order(&self, customer: &Identity, request: NewOrderRequest) -> Result<OrderDetails, AppError> {
        request.validate()?;
        let user_id = customer.user_id.ok_or(AppError::UnauthorizedAccess)?;

        let mut lines: Vec<(Product, i64)> = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = self
                .repo
                .get_product_by_id(item.product_id)
                .await?
                .filter(|p| p.is_active)
                .ok_or_else(|| AppError::InvalidInput(format!("Product {} is not available", item.product_id)))?;

            lines.push((product, item.quantity));
        }

        let total_amount: f64 = lines
            .iter()
            .map(|(product, quantity)| product.price * *quantity as f64)
            .sum();

        let now = Utc::now();
        let insert = OrderInsert {
            user_id,
            status: DEFAULT_ORDER_STATUS.to_string(),
            total_amount,
            shipping_address: clean_text(request.shipping_address.as_deref()),
            payment_method: request.payment_method.as_deref().map(|m| m.trim().to_string()),
            notes: clean_text(request.notes.as_deref()),
            created_at: now,
            updated_at: now,
        };

        // TODO: wrap order and item inserts in one transaction once the hosted backend exposes an RPC for it
        let order = self.repo.create_order(&insert).await?;

        let mut items = Vec::with_capacity(lines.len());
        for (product, quantity) in lines {
            let item = OrderItemInsert {
                order_id: order.id,
                product_id: product.id,
                quantity,
                price: product.price,
            };
            items.push(self.repo.create_order_item(&item).await?);
        }

        tracing::info!(order_id = order.id, user_id, total_amount, "Order placed");
        Ok(OrderDetails { order, items })
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.repo.list_orders().await
    }

    pub async fn list_customer_orders(&self, customer: &Identity) -> Result<Vec<Order>, AppError> {
        let user_id = customer.user_id.ok_or(AppError::UnauthorizedAccess)?;
        self.repo.list_orders_by_user(user_id).await
    }

    pub async fn get_order(&self, id: i64) -> Result<OrderDetails, AppError> {
        let order = self
            .repo
            .get_order_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        let items = self.repo.list_order_items(id).await?;

        Ok(OrderDetails { order, items })
    }

    pub async fn update_status(&self, id: i64, update: OrderStatusUpdate) -> Result<Order, AppError> {
        update.validate()?;
        let status = update.status.trim().to_lowercase();

        let order = self.repo.update_order_status(id, &status).await.map_err(order_not_found)?;
        tracing::info!(order_id = id, status = %status, "Order status changed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        order::{NewOrderItem, OrderItem},
        product::{ProductInsert, ProductUpdate},
    };
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        Shop {}

        #[async_trait]
        impl OrderRepository for Shop {
            async fn create_order(&self, order: &OrderInsert) -> Result<Order, AppError>;
            async fn get_order_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;
            async fn list_orders(&self) -> Result<Vec<Order>, AppError>;
            async fn list_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, AppError>;
            async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, AppError>;
            async fn create_order_item(&self, item: &OrderItemInsert) -> Result<OrderItem, AppError>;
            async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, AppError>;
        }

        #[async_trait]
        impl ProductRepository for Shop {
            async fn create_product(&self, product: &ProductInsert) -> Result<Product, AppError>;
            async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;
            async fn list_products(&self) -> Result<Vec<Product>, AppError>;
            async fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, AppError>;
            async fn delete_product(&self, id: i64) -> Result<(), AppError>;
        }
    }

    fn product(id: i64, price: f64, is_active: bool) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: format!("Item {}", id),
            description: None,
            price,
            category: None,
            stock_quantity: 10,
            image_url: None,
            is_active,
            slug: Some(format!("item-{}", id)),
            created_at: now,
            updated_at: now,
        }
    }

    fn request(items: Vec<(i64, i64)>) -> NewOrderRequest {
        NewOrderRequest {
            items: items
                .into_iter()
                .map(|(product_id, quantity)| NewOrderItem { product_id, quantity })
                .collect(),
            shipping_address: Some("1 Main St".into()),
            payment_method: Some("card".into()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn total_is_computed_from_catalog_prices() {
        let mut shop = MockShop::new();
        shop.expect_get_product_by_id().returning(|id| match id {
            1 => Ok(Some(product(1, 10.0, true))),
            2 => Ok(Some(product(2, 2.5, true))),
            _ => Ok(None),
        });
        shop.expect_create_order()
            .withf(|order| order.user_id == 7 && (order.total_amount - 25.0).abs() < f64::EPSILON && order.status == "pending")
            .times(1)
            .returning(|order| {
                Ok(Order {
                    id: 100,
                    user_id: order.user_id,
                    status: order.status.clone(),
                    total_amount: order.total_amount,
                    shipping_address: order.shipping_address.clone(),
                    payment_method: order.payment_method.clone(),
                    notes: order.notes.clone(),
                    created_at: order.created_at,
                    updated_at: order.updated_at,
                })
            });
        shop.expect_create_order_item().times(2).returning(|item| {
            Ok(OrderItem {
                id: item.product_id,
                order_id: item.order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
        });

        let details = OrderHandler::new(Arc::new(shop))
            .place_order(&Identity::customer(7, "fan_seven"), request(vec![(1, 2), (2, 2)]))
            .await
            .unwrap();

        assert_eq!(details.order.id, 100);
        assert_eq!(details.items.len(), 2);
        assert!(details.items.iter().all(|i| i.order_id == 100));
    }

    #[tokio::test]
    async fn inactive_product_cannot_be_ordered() {
        let mut shop = MockShop::new();
        shop.expect_get_product_by_id().returning(|id| Ok(Some(product(id, 5.0, false))));

        let result = OrderHandler::new(Arc::new(shop))
            .place_order(&Identity::customer(7, "fan_seven"), request(vec![(3, 1)]))
            .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn empty_order_is_invalid() {
        let shop = MockShop::new();

        let result = OrderHandler::new(Arc::new(shop))
            .place_order(&Identity::customer(7, "fan_seven"), request(vec![]))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn missing_order_details_are_not_found() {
        let mut shop = MockShop::new();
        shop.expect_get_order_by_id().returning(|_| Ok(None));

        let result = OrderHandler::new(Arc::new(shop)).get_order(5).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
