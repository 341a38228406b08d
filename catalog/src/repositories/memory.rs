// catalog/src/repositories/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{ProductRepository, RoleRepository, UserRepository};
use crate::errors::{AppError, Result};
use crate::models::{Product, Role, User};

/// Rows keyed by id plus the sequence that hands out new ids (starting at 1).
///
/// Guards are taken and released inside each call; nothing here is held
/// across an `.await`.
#[derive(Debug)]
struct Table<T> {
  rows: RwLock<BTreeMap<i64, T>>,
  sequence: AtomicI64,
}

impl<T: Clone> Table<T> {
  fn new() -> Self {
    Self {
      rows: RwLock::new(BTreeMap::new()),
      sequence: AtomicI64::new(1),
    }
  }

  fn next_id(&self) -> i64 {
    self.sequence.fetch_add(1, Ordering::SeqCst)
  }

  fn all(&self) -> Vec<T> {
    self.rows.read().values().cloned().collect()
  }

  fn get(&self, id: i64) -> Option<T> {
    self.rows.read().get(&id).cloned()
  }

  fn remove(&self, id: i64) {
    self.rows.write().remove(&id);
  }
}

#[derive(Debug)]
pub struct InMemoryUserRepository {
  table: Table<User>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self { table: Table::new() }
  }
}

impl Default for InMemoryUserRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn find_all(&self) -> Result<Vec<User>> {
    Ok(self.table.all())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
    Ok(self.table.get(id))
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.table.rows.read().values().find(|user| user.email == email).cloned())
  }

  async fn save(&self, mut user: User) -> Result<User> {
    let mut rows = self.table.rows.write();
    // Mirrors the UNIQUE constraint on users.email.
    if rows.values().any(|other| other.email == user.email && other.id != user.id) {
      return Err(AppError::DuplicateEmail(user.email));
    }
    if user.is_new() {
      user.id = self.table.next_id();
    } else if !rows.contains_key(&user.id) {
      return Err(AppError::user_not_found(user.id));
    }
    rows.insert(user.id, user.clone());
    Ok(user)
  }

  async fn delete(&self, user: &User) -> Result<()> {
    self.table.remove(user.id);
    Ok(())
  }
}

#[derive(Debug)]
pub struct InMemoryProductRepository {
  table: Table<Product>,
}

impl InMemoryProductRepository {
  pub fn new() -> Self {
    Self { table: Table::new() }
  }
}

impl Default for InMemoryProductRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
  async fn find_all(&self) -> Result<Vec<Product>> {
    Ok(self.table.all())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
    Ok(self.table.get(id))
  }

  async fn save(&self, mut product: Product) -> Result<Product> {
    let mut rows = self.table.rows.write();
    if product.is_new() {
      product.id = self.table.next_id();
    } else if !rows.contains_key(&product.id) {
      return Err(AppError::product_not_found(product.id));
    }
    rows.insert(product.id, product.clone());
    Ok(product)
  }

  async fn delete(&self, product: &Product) -> Result<()> {
    self.table.remove(product.id);
    Ok(())
  }
}

#[derive(Debug)]
pub struct InMemoryRoleRepository {
  table: Table<Role>,
}

impl InMemoryRoleRepository {
  pub fn new() -> Self {
    Self { table: Table::new() }
  }
}

impl Default for InMemoryRoleRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
  async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Role>> {
    Ok(
      self
        .table
        .rows
        .read()
        .values()
        .filter(|role| role.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn save(&self, mut role: Role) -> Result<Role> {
    if role.id == 0 {
      role.id = self.table.next_id();
    }
    self.table.rows.write().insert(role.id, role.clone());
    Ok(role)
  }

  async fn delete_all_by_user_id(&self, user_id: i64) -> Result<()> {
    self.table.rows.write().retain(|_, role| role.user_id != user_id);
    Ok(())
  }
}
