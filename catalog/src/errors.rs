// catalog/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Email is already registered: {0}")]
  DuplicateEmail(String),

  #[error("Login Failed: {0}")]
  LoginFailed(String),

  // Missing, malformed and incorrectly signed tokens all end up here.
  #[error("Invalid Token: {0}")]
  InvalidToken(String),

  #[error("Access Denied: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn product_not_found(id: i64) -> Self {
    AppError::NotFound(format!("Product with ID {} not found.", id))
  }

  pub fn user_not_found(id: i64) -> Self {
    AppError::NotFound(format!("User with ID {} not found.", id))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::DuplicateEmail(_) | AppError::LoginFailed(_) => StatusCode::BAD_REQUEST,
      AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }

    match self {
      // Never leak driver details to the client.
      AppError::Sqlx(_) => HttpResponse::build(status).json(json!({"error": "Database operation failed"})),
      AppError::Config(m) => HttpResponse::build(status).json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Internal(m) => {
        HttpResponse::build(status).json(json!({"error": "An internal error occurred", "detail": m}))
      }
      AppError::Validation(m)
      | AppError::DuplicateEmail(m)
      | AppError::LoginFailed(m)
      | AppError::InvalidToken(m)
      | AppError::Forbidden(m)
      | AppError::NotFound(m) => HttpResponse::build(status).json(json!({"error": m})),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
