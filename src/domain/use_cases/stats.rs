use std::sync::Arc;

use crate::{
    entities::stats::DashboardStats,
    errors::AppError,
    repositories::{
        contact_message::ContactMessageRepository, fan_photo::FanPhotoRepository, order::OrderRepository,
        product::ProductRepository, user::CustomerRepository,
    },
};

/// Aggregates for the admin dashboard, computed from full listings.
pub struct StatsHandler<R: ?Sized> {
    pub repo: Arc<R>,
}

impl<R> StatsHandler<R>
where
    R: ProductRepository + CustomerRepository + OrderRepository + ContactMessageRepository + FanPhotoRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        StatsHandler { repo }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, AppError> {
        let (products, customers, orders, messages) = tokio::try_join!(
            self.repo.list_products(),
            self.repo.list_customers(),
            self.repo.list_orders(),
            self.repo.list_contact_messages(),
        )?;

        Ok(DashboardStats::compute(&products, &customers, &orders, &messages))
    }

    /// Dashboard figures plus fan photo counts.
    pub async fn dashboard_with_gallery(&self) -> Result<DashboardStats, AppError> {
        let (stats, photos) = tokio::try_join!(self.dashboard(), self.repo.list_fan_photos())?;
        Ok(stats.with_fan_photos(&photos))
    }
}
