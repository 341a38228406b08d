// catalog/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEFAULT_JWT_SECRET: &str = "12345678901234567890123456789012";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// When absent the server runs on the in-memory repositories.
  pub database_url: Option<String>,
  pub jwt_secret: String,

  // Optional: for seeding sample data on startup
  pub seed_db: bool,
  pub admin_email: Option<String>,
  pub admin_password: Option<String>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      jwt_secret: DEFAULT_JWT_SECRET.to_string(),
      seed_db: false,
      admin_email: None,
      admin_password: None,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    let defaults = Self::default();

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match get_env("SERVER_PORT") {
      Ok(port) => port
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      Err(_) => defaults.server_port,
    };
    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());

    let jwt_secret = get_env("JWT_SECRET").unwrap_or(defaults.jwt_secret);
    if jwt_secret.is_empty() {
      return Err(AppError::Config("JWT_SECRET must not be empty.".to_string()));
    }

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;
    let admin_email = get_env("ADMIN_EMAIL").ok();
    let admin_password = get_env("ADMIN_PASSWORD").ok();

    tracing::info!(
      server_host = %server_host,
      server_port,
      postgres = database_url.is_some(),
      seed_db,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      jwt_secret,
      seed_db,
      admin_email,
      admin_password,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
