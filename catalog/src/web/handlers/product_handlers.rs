// catalog/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::ProductData;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.products.get_products().await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.products.get_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(
    name = "handler::create_product",
    skip(app_state, auth_user, req_payload),
    fields(user_id = auth_user.user_id)
)]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser, // Rejects the request with 401 before the body is read
  req_payload: web::Json<ProductData>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.products.create_product(req_payload.into_inner()).await?;
  info!(product_id = product.id, "Product created by user {}.", auth_user.user_id);
  Ok(HttpResponse::Created().json(product))
}

#[instrument(
    name = "handler::update_product",
    skip(app_state, auth_user, path, req_payload),
    fields(user_id = auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  req_payload: web::Json<ProductData>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .products
    .update_product(path.into_inner(), req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(
    name = "handler::delete_product",
    skip(app_state, auth_user, path),
    fields(user_id = auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.products.delete_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().finish())
}
