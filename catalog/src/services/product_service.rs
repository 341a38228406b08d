// catalog/src/services/product_service.rs

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{Product, ProductData};
use crate::repositories::ProductRepository;

/// Product CRUD on top of a [`ProductRepository`].
pub struct ProductService {
  products: Arc<dyn ProductRepository>,
}

impl ProductService {
  pub fn new(products: Arc<dyn ProductRepository>) -> Self {
    Self { products }
  }

  #[instrument(name = "product_service::get_products", skip(self))]
  pub async fn get_products(&self) -> Result<Vec<Product>> {
    self.products.find_all().await
  }

  #[instrument(name = "product_service::get_product", skip(self))]
  pub async fn get_product(&self, id: i64) -> Result<Product> {
    self.find_product(id).await
  }

  #[instrument(name = "product_service::create_product", skip(self, data))]
  pub async fn create_product(&self, data: ProductData) -> Result<Product> {
    let product = Product::from_data(data)?;
    let created = self.products.save(product).await?;
    info!(product_id = created.id, "Product created.");
    Ok(created)
  }

  #[instrument(name = "product_service::update_product", skip(self, data))]
  pub async fn update_product(&self, id: i64, data: ProductData) -> Result<Product> {
    // Validate before the lookup so a bad payload is always a 400.
    data.validate()?;
    let mut product = self.find_product(id).await?;
    product.change_with(data)?;
    let updated = self.products.save(product).await?;
    info!(product_id = updated.id, "Product updated.");
    Ok(updated)
  }

  #[instrument(name = "product_service::delete_product", skip(self))]
  pub async fn delete_product(&self, id: i64) -> Result<Product> {
    let product = self.find_product(id).await?;
    self.products.delete(&product).await?;
    info!(product_id = id, "Product deleted.");
    Ok(product)
  }

  async fn find_product(&self, id: i64) -> Result<Product> {
    self.products.find_by_id(id).await?.ok_or_else(|| {
      warn!("Product with ID {} not found.", id);
      AppError::product_not_found(id)
    })
  }
}
