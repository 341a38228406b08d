// catalog/src/services/auth_service.rs

//! Provides authentication-related services: access tokens, role lookup,
//! login, and password hashing and verification.

use crate::errors::AppError; // Application-specific error type
use crate::models::Role;
use crate::repositories::{RoleRepository, UserRepository};
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,   // The main trait for hashing
    PasswordVerifier, // The main trait for verifying
    SaltString,
  },
  Argon2, // The Argon2 algorithm instance
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Payload carried by every access token.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
  user_id: i64,
}

/// Issues and checks HS256 access tokens and answers role queries.
pub struct AuthenticationService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  users: Arc<dyn UserRepository>,
  roles: Arc<dyn RoleRepository>,
}

impl AuthenticationService {
  pub fn new(secret: &str, users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
    // Tokens carry only the user id: no exp, iat or aud.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      validation,
      users,
      roles,
    }
  }

  /// Signs an access token for `user_id`.
  pub fn encode(&self, user_id: i64) -> Result<String, AppError> {
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &Claims { user_id }, &self.encoding_key).map_err(|e| {
      error!(error = %e, user_id, "Failed to sign access token.");
      AppError::Internal(format!("Failed to sign access token: {}", e))
    })
  }

  /// Returns the user id carried by `token`.
  ///
  /// Empty, malformed and wrongly signed tokens all fail with
  /// [`AppError::InvalidToken`].
  #[instrument(name = "auth_service::parse_token", skip_all)]
  pub fn parse_token(&self, token: &str) -> Result<i64, AppError> {
    let token = token.trim();
    if token.is_empty() {
      warn!("Rejected empty access token.");
      return Err(AppError::InvalidToken("Access token is empty.".to_string()));
    }

    match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
      Ok(data) => {
        debug!(user_id = data.claims.user_id, "Access token accepted.");
        Ok(data.claims.user_id)
      }
      Err(e) => {
        warn!(error = %e, "Rejected access token.");
        Err(AppError::InvalidToken("Access token rejected.".to_string()))
      }
    }
  }

  #[instrument(name = "auth_service::roles", skip(self))]
  pub async fn roles(&self, user_id: i64) -> Result<Vec<Role>, AppError> {
    self.roles.find_all_by_user_id(user_id).await
  }

  /// Exchanges email and password for an access token.
  #[instrument(name = "auth_service::login", skip(self, password))]
  pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
    let user = match self.users.find_by_email(email).await? {
      Some(user) => user,
      None => {
        warn!("Login attempt for unknown email.");
        return Err(AppError::LoginFailed(format!("Invalid email or password: {}", email)));
      }
    };

    if password.is_empty() || !verify_password(&user.password_hash, password)? {
      warn!(user_id = user.id, "Login attempt with wrong password.");
      return Err(AppError::LoginFailed(format!("Invalid email or password: {}", email)));
    }

    info!(user_id = user.id, "User logged in.");
    self.encode(user.id)
  }
}

/// Hashes a plain-text password using Argon2.
///
/// # Arguments
/// * `password`: The plain-text password to hash.
///
/// # Returns
/// The Argon2 PHC string on success, or an `AppError` if hashing fails or the
/// password is empty.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch. A stored hash that cannot be parsed is an
/// internal error.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display), fields(hash_len = hashed_password_str.len()))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}
