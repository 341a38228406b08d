// catalog/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::{AppError, Result};

const PASSWORD_MIN_LEN: usize = 4;
const PASSWORD_MAX_LEN: usize = 1024;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64, // 0 until the repository assigns one
  pub email: String,
  pub name: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(email: String, name: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: 0,
      email,
      name,
      password_hash,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn is_new(&self) -> bool {
    self.id == 0
  }
}

/// Public view of a user returned by the `/users` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResultData {
  pub id: i64,
  pub email: String,
  pub name: String,
}

impl From<User> for UserResultData {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      email: user.email,
      name: user.name,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRegistrationData {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub password: String,
}

impl UserRegistrationData {
  pub fn validate(&self) -> Result<()> {
    let email = self.email.trim();
    if email.is_empty() || !email.contains('@') {
      return Err(AppError::Validation("A valid email is required.".to_string()));
    }
    validate_name(&self.name)?;
    validate_password(&self.password)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserModificationData {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub password: String,
}

impl UserModificationData {
  pub fn validate(&self) -> Result<()> {
    validate_name(&self.name)?;
    validate_password(&self.password)
  }
}

fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(AppError::Validation("Name must not be empty.".to_string()));
  }
  Ok(())
}

fn validate_password(password: &str) -> Result<()> {
  let len = password.chars().count();
  if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
    return Err(AppError::Validation(format!(
      "Password must be between {} and {} characters.",
      PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
    )));
  }
  Ok(())
}
