// catalog/src/db.rs

//! PostgreSQL bootstrap and optional sample-data seeding.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::role::ROLE_ADMIN;
use crate::models::{ProductData, UserRegistrationData};
use crate::state::AppState;

const MAX_CONNECTIONS: u32 = 5;

// Executed one by one; each statement is idempotent.
const SCHEMA: &[&str] = &[
  "CREATE TABLE IF NOT EXISTS users (
     id BIGSERIAL PRIMARY KEY,
     email TEXT NOT NULL UNIQUE,
     name TEXT NOT NULL,
     password_hash TEXT NOT NULL,
     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
   )",
  "CREATE TABLE IF NOT EXISTS roles (
     id BIGSERIAL PRIMARY KEY,
     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
     name TEXT NOT NULL,
     UNIQUE (user_id, name)
   )",
  "CREATE TABLE IF NOT EXISTS products (
     id BIGSERIAL PRIMARY KEY,
     name TEXT NOT NULL,
     maker TEXT NOT NULL,
     price INTEGER NOT NULL CHECK (price > 0),
     image_url TEXT
   )",
];

pub async fn connect(database_url: &str) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(MAX_CONNECTIONS)
    .connect(database_url)
    .await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

#[instrument(name = "db::ensure_schema", skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
  for statement in SCHEMA {
    sqlx::query(*statement).execute(pool).await?;
  }
  info!("Database schema is up to date.");
  Ok(())
}

/// Inserts sample products when the catalog is empty and, if `ADMIN_EMAIL` and
/// `ADMIN_PASSWORD` are set, an account holding the ADMIN role.
#[instrument(name = "db::seed", skip_all)]
pub async fn seed(state: &AppState, config: &AppConfig) -> Result<()> {
  if state.products.get_products().await?.is_empty() {
    let samples = [
      ("Mouse Toy", "CatWorld", 5000, Some("https://example.com/images/mouse-toy.png")),
      ("Scratching Post", "CatWorld", 32000, None),
      ("Feather Wand", "PawLab", 7500, None),
    ];
    for (name, maker, price, image_url) in samples {
      state
        .products
        .create_product(ProductData {
          name: name.to_string(),
          maker: maker.to_string(),
          price: Some(price),
          image_url: image_url.map(str::to_string),
        })
        .await?;
    }
    info!("Seeded {} sample products.", samples.len());
  }

  let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
    warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; skipping admin account.");
    return Ok(());
  };

  let admin = match state.users.find_by_email(email).await? {
    Some(existing) => existing,
    None => {
      state
        .users
        .register_user(UserRegistrationData {
          email: email.clone(),
          name: "Administrator".to_string(),
          password: password.clone(),
        })
        .await?
    }
  };
  state.users.grant_role(admin.id, ROLE_ADMIN).await?;
  info!(user_id = admin.id, "Admin account ready.");
  Ok(())
}
