use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::product::{NewProductRequest, Product, ProductUpdate},
    errors::AppError,
    repositories::product::ProductRepository,
};

fn product_not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
        other => other,
    }
}

pub struct CatalogHandler<R: ?Sized> {
    pub product_repo: Arc<R>,
}

impl<R> CatalogHandler<R>
where
    R: ProductRepository + ?Sized,
{
    pub fn new(product_repo: Arc<R>) -> Self {
        CatalogHandler { product_repo }
    }

    pub async fn create_product(&self, request: NewProductRequest) -> Result<Product, AppError> {
        request.validate()?;

        let product = self
            .product_repo
            .create_product(&request.prepare_for_insert())
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::Conflict("A product with this slug already exists".to_string()),
                other => other,
            })?;

        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    /// Every product, including inactive ones.
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.product_repo.list_products().await
    }

    /// The public storefront only shows active products.
    pub async fn list_active_products(&self) -> Result<Vec<Product>, AppError> {
        let products = self.product_repo.list_products().await?;
        Ok(products.into_iter().filter(|p| p.is_active).collect())
    }

    pub async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Product, AppError> {
        update.validate()?;
        self.product_repo.update_product(id, &update).await.map_err(product_not_found)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        self.product_repo.delete_product(id).await.map_err(product_not_found)?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
