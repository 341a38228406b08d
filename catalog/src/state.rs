// catalog/src/state.rs
use crate::config::AppConfig;
use crate::repositories::{
  InMemoryProductRepository, InMemoryRoleRepository, InMemoryUserRepository, PgProductRepository, PgRoleRepository,
  PgUserRepository, ProductRepository, RoleRepository, UserRepository,
};
use crate::services::{AuthenticationService, ProductService, UserService};
use sqlx::PgPool;
use std::sync::Arc;

/// Everything a request handler needs, shared across workers.
#[derive(Clone)]
pub struct AppState {
  pub products: Arc<ProductService>,
  pub users: Arc<UserService>,
  pub auth: Arc<AuthenticationService>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// State backed by process-local repositories. Data is lost on restart.
  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    Self::from_repositories(
      config,
      Arc::new(InMemoryProductRepository::new()),
      Arc::new(InMemoryUserRepository::new()),
      Arc::new(InMemoryRoleRepository::new()),
    )
  }

  pub fn postgres(config: Arc<AppConfig>, pool: PgPool) -> Self {
    Self::from_repositories(
      config,
      Arc::new(PgProductRepository::new(pool.clone())),
      Arc::new(PgUserRepository::new(pool.clone())),
      Arc::new(PgRoleRepository::new(pool)),
    )
  }

  pub fn from_repositories(
    config: Arc<AppConfig>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
  ) -> Self {
    let auth = AuthenticationService::new(&config.jwt_secret, users.clone(), roles.clone());
    Self {
      products: Arc::new(ProductService::new(products)),
      users: Arc::new(UserService::new(users, roles)),
      auth: Arc::new(auth),
      config,
    }
  }
}
