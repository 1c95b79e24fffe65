use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_ORDER_STATUS: &str = "pending";
pub const COMPLETED_ORDER_STATUS: &str = "completed";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub total_amount: f64,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderInsert {
    pub user_id: i64,
    pub status: String,
    pub total_amount: f64,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemInsert {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

// ───── API Request Models ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: i64,

    #[validate(range(min = 1, max = 1000, message = "Quantity must be between 1 and 1000"))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    #[validate(length(min = 1, message = "An order needs at least one item"), nested)]
    pub items: Vec<NewOrderItem>,

    #[validate(length(max = 500))]
    pub shipping_address: Option<String>,

    #[validate(length(max = 50))]
    pub payment_method: Option<String>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderStatusUpdate {
    #[validate(length(min = 1, max = 50, message = "Status must be between 1 and 50 characters"))]
    pub status: String,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_order_is_invalid() {
        let request: NewOrderRequest = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn item_list_errors_are_reported_on_items() {
        let request: NewOrderRequest = serde_json::from_str(r#"{"items": []}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));

        let request: NewOrderRequest =
            serde_json::from_str(r#"{"items": [{"productId": 1, "quantity": 2}]}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let request: NewOrderRequest =
            serde_json::from_str(r#"{"items": [{"productId": 1, "quantity": 0}]}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn details_flatten_the_order() {
        let now = Utc::now();
        let details = OrderDetails {
            order: Order {
                id: 3,
                user_id: 7,
                status: DEFAULT_ORDER_STATUS.into(),
                total_amount: 20.0,
                shipping_address: None,
                payment_method: None,
                notes: None,
                created_at: now,
                updated_at: now,
            },
            items: vec![],
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["totalAmount"], 20.0);
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
