// catalog/src/repositories/postgres.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::error;

use super::{ProductRepository, RoleRepository, UserRepository};
use crate::errors::{AppError, Result};
use crate::models::{Product, Role, User};

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, name, maker, price, image_url";

// Turns a violation of users_email_key into the domain error.
fn map_user_write_error(err: sqlx::Error, email: &str) -> AppError {
  match &err {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::DuplicateEmail(email.to_string()),
    _ => {
      error!("Database error while saving user {}: {}", email, err);
      AppError::Sqlx(err)
    }
  }
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
  pool: PgPool,
}

impl PgUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for PgUserRepository {
  async fn find_all(&self) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id ASC", USER_COLUMNS))
      .fetch_all(&self.pool)
      .await?;
    Ok(users)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn save(&self, user: User) -> Result<User> {
    if user.is_new() {
      return sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, name, password_hash, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        USER_COLUMNS
      ))
      .bind(&user.email)
      .bind(&user.name)
      .bind(&user.password_hash)
      .bind(user.created_at)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| map_user_write_error(e, &user.email));
    }

    sqlx::query_as::<_, User>(&format!(
      "UPDATE users SET email = $2, name = $3, password_hash = $4, updated_at = $5 \
       WHERE id = $1 RETURNING {}",
      USER_COLUMNS
    ))
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.password_hash)
    .bind(Utc::now())
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| map_user_write_error(e, &user.email))?
    .ok_or_else(|| AppError::user_not_found(user.id))
  }

  async fn delete(&self, user: &User) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(user.id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[derive(Debug, Clone)]
pub struct PgProductRepository {
  pool: PgPool,
}

impl PgProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
  async fn find_all(&self) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products ORDER BY id ASC", PRODUCT_COLUMNS))
      .fetch_all(&self.pool)
      .await?;
    Ok(products)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  async fn save(&self, product: Product) -> Result<Product> {
    if product.is_new() {
      let created = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (name, maker, price, image_url) VALUES ($1, $2, $3, $4) RETURNING {}",
        PRODUCT_COLUMNS
      ))
      .bind(&product.name)
      .bind(&product.maker)
      .bind(product.price)
      .bind(&product.image_url)
      .fetch_one(&self.pool)
      .await?;
      return Ok(created);
    }

    sqlx::query_as::<_, Product>(&format!(
      "UPDATE products SET name = $2, maker = $3, price = $4, image_url = $5 WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.maker)
    .bind(product.price)
    .bind(&product.image_url)
    .fetch_optional(&self.pool)
    .await?
    .ok_or_else(|| AppError::product_not_found(product.id))
  }

  async fn delete(&self, product: &Product) -> Result<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(product.id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[derive(Debug, Clone)]
pub struct PgRoleRepository {
  pool: PgPool,
}

impl PgRoleRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
  async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>("SELECT id, user_id, name FROM roles WHERE user_id = $1 ORDER BY id ASC")
      .bind(user_id)
      .fetch_all(&self.pool)
      .await?;
    Ok(roles)
  }

  async fn save(&self, role: Role) -> Result<Role> {
    let saved = sqlx::query_as::<_, Role>(
      "INSERT INTO roles (user_id, name) VALUES ($1, $2) \
       ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name \
       RETURNING id, user_id, name",
    )
    .bind(role.user_id)
    .bind(&role.name)
    .fetch_one(&self.pool)
    .await?;
    Ok(saved)
  }

  async fn delete_all_by_user_id(&self, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM roles WHERE user_id = $1")
      .bind(user_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}
