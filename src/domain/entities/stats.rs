use serde::Serialize;

use super::{
    contact_message::ContactMessage,
    fan_photo::{FanPhoto, PhotoStatus},
    order::{Order, COMPLETED_ORDER_STATUS, DEFAULT_ORDER_STATUS},
    product::Product,
    user::Customer,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub active_products: usize,
    pub total_customers: usize,
    pub active_customers: usize,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub unread_messages: usize,
    pub total_revenue: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fan_photos: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_fan_photos: Option<usize>,
}

impl DashboardStats {
    pub fn compute(
        products: &[Product],
        customers: &[Customer],
        orders: &[Order],
        messages: &[ContactMessage],
    ) -> Self {
        DashboardStats {
            total_products: products.len(),
            active_products: products.iter().filter(|p| p.is_active).count(),
            total_customers: customers.len(),
            active_customers: customers.iter().filter(|c| c.is_active).count(),
            total_orders: orders.len(),
            pending_orders: orders.iter().filter(|o| o.status == DEFAULT_ORDER_STATUS).count(),
            unread_messages: messages.iter().filter(|m| !m.is_read).count(),
            total_revenue: orders
                .iter()
                .filter(|o| o.status == COMPLETED_ORDER_STATUS)
                .map(|o| o.total_amount)
                .sum(),
            total_fan_photos: None,
            pending_fan_photos: None,
        }
    }

    pub fn with_fan_photos(mut self, photos: &[FanPhoto]) -> Self {
        self.total_fan_photos = Some(photos.len());
        self.pending_fan_photos = Some(
            photos.iter().filter(|p| p.status == PhotoStatus::Pending).count(),
        );
        self
    }
}
