// catalog/src/repositories/mod.rs

//! Data-access contracts and their two backends: an in-memory one (default,
//! used by the tests) and PostgreSQL.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Product, Role, User};

pub use memory::{InMemoryProductRepository, InMemoryRoleRepository, InMemoryUserRepository};
pub use postgres::{PgProductRepository, PgRoleRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn find_all(&self) -> Result<Vec<User>>;

  async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

  async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

  /// Inserts a new user (id 0) or replaces an existing one, returning the stored row.
  async fn save(&self, user: User) -> Result<User>;

  async fn delete(&self, user: &User) -> Result<()>;

  /// Removes the user if present. An unknown id is not an error.
  async fn delete_by_id(&self, id: i64) -> Result<()> {
    if let Some(user) = self.find_by_id(id).await? {
      self.delete(&user).await?;
    }
    Ok(())
  }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn find_all(&self) -> Result<Vec<Product>>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

  /// Inserts a new product (id 0) or replaces an existing one, returning the stored row.
  async fn save(&self, product: Product) -> Result<Product>;

  async fn delete(&self, product: &Product) -> Result<()>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
  async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Role>>;

  async fn save(&self, role: Role) -> Result<Role>;

  async fn delete_all_by_user_id(&self, user_id: i64) -> Result<()>;
}
