use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub stock_quantity: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductInsert {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub stock_quantity: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock_quantity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
}

// ───── API Request Models ────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock_quantity: Option<i64>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
}

impl NewProductRequest {
    /// Products are active on creation; a slug is derived from the name when
    /// none is supplied.
    pub fn prepare_for_insert(self) -> ProductInsert {
        let now = Utc::now();
        let slug = self
            .slug
            .map(|s| slug::slugify(&s))
            .unwrap_or_else(|| slug::slugify(&self.name));

        ProductInsert {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            category: self.category,
            stock_quantity: self.stock_quantity.unwrap_or(0),
            image_url: self.image_url,
            is_active: true,
            slug: Some(slug),
            created_at: now,
            updated_at: now,
        }
    }
}
