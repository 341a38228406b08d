// catalog/src/main.rs

use actix_web::HttpServer;
use anyhow::Context;
use catalog::{db, web, AppConfig, AppState};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting product catalog server...");

  let app_config = Arc::new(AppConfig::from_env().context("failed to load application configuration")?);

  let app_state = match &app_config.database_url {
    Some(database_url) => {
      let pool = db::connect(database_url).await.context("failed to connect to the database")?;
      db::ensure_schema(&pool).await.context("failed to prepare the database schema")?;
      AppState::postgres(app_config.clone(), pool)
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; using in-memory storage.");
      AppState::in_memory(app_config.clone())
    }
  };

  if app_config.seed_db {
    db::seed(&app_state, &app_config).await.context("failed to seed sample data")?;
  }

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    web::build_app(app_state.clone()).wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
