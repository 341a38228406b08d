// catalog/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i64, // 0 until the repository assigns one
  pub name: String,
  pub maker: String,
  pub price: i32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
}

impl Product {
  /// Builds an unsaved product from a create payload.
  pub fn from_data(data: ProductData) -> Result<Self> {
    let price = data.validate()?;
    Ok(Self {
      id: 0,
      name: data.name,
      maker: data.maker,
      price,
      image_url: data.image_url,
    })
  }

  /// Replaces every mutable field. The id is left untouched.
  pub fn change_with(&mut self, data: ProductData) -> Result<()> {
    let price = data.validate()?;
    self.name = data.name;
    self.maker = data.maker;
    self.price = price;
    self.image_url = data.image_url;
    Ok(())
  }

  pub fn is_new(&self) -> bool {
    self.id == 0
  }
}

/// Request body for creating or updating a product.
///
/// Missing `name`/`maker` deserialize as empty strings so they are reported by
/// [`ProductData::validate`] instead of failing inside the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub maker: String,
  pub price: Option<i32>,
  pub image_url: Option<String>,
}

impl ProductData {
  /// Checks the payload and returns the validated price.
  pub fn validate(&self) -> Result<i32> {
    if self.name.trim().is_empty() {
      return Err(AppError::Validation("Product name must not be empty.".to_string()));
    }
    if self.maker.trim().is_empty() {
      return Err(AppError::Validation("Product maker must not be empty.".to_string()));
    }
    match self.price {
      Some(price) if price > 0 => Ok(price),
      Some(price) => Err(AppError::Validation(format!(
        "Product price must be positive, got {}.",
        price
      ))),
      None => Err(AppError::Validation("Product price is required.".to_string())),
    }
  }
}
