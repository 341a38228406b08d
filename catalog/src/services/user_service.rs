// catalog/src/services/user_service.rs

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::role::ROLE_USER;
use crate::models::{Role, User, UserModificationData, UserRegistrationData};
use crate::repositories::{RoleRepository, UserRepository};
use crate::services::auth_service;

/// Registration, modification and removal of user accounts.
pub struct UserService {
  users: Arc<dyn UserRepository>,
  roles: Arc<dyn RoleRepository>,
}

impl UserService {
  pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
    Self { users, roles }
  }

  #[instrument(name = "user_service::register_user", skip(self, data), fields(email = %data.email))]
  pub async fn register_user(&self, data: UserRegistrationData) -> Result<User> {
    data.validate()?;
    let email = data.email.trim().to_string();
    if self.users.find_by_email(&email).await?.is_some() {
      warn!("Registration rejected: email already in use.");
      return Err(AppError::DuplicateEmail(email));
    }

    let password_hash = auth_service::hash_password(&data.password)?;
    let user = self.users.save(User::new(email, data.name, password_hash)).await?;
    self.grant_role(user.id, ROLE_USER).await?;

    info!(user_id = user.id, "User registered.");
    Ok(user)
  }

  /// Replaces name and password. Only the account owner may do this.
  #[instrument(name = "user_service::update_user", skip(self, data))]
  pub async fn update_user(&self, id: i64, data: UserModificationData, caller_id: i64) -> Result<User> {
    if id != caller_id {
      warn!("User {} attempted to modify user {}.", caller_id, id);
      return Err(AppError::Forbidden(format!("Cannot modify user with ID {}.", id)));
    }
    data.validate()?;

    let mut user = self.find_user(id).await?;
    user.name = data.name;
    user.password_hash = auth_service::hash_password(&data.password)?;
    let updated = self.users.save(user).await?;

    info!(user_id = id, "User updated.");
    Ok(updated)
  }

  #[instrument(name = "user_service::delete_user", skip(self))]
  pub async fn delete_user(&self, id: i64) -> Result<User> {
    let user = self.find_user(id).await?;
    self.roles.delete_all_by_user_id(id).await?;
    self.users.delete_by_id(id).await?;
    info!(user_id = id, "User deleted.");
    Ok(user)
  }

  /// Grants `role_name` to the user unless it is already granted.
  pub async fn grant_role(&self, user_id: i64, role_name: &str) -> Result<Role> {
    let granted = self.roles.find_all_by_user_id(user_id).await?;
    if let Some(existing) = granted.into_iter().find(|role| role.name == role_name) {
      return Ok(existing);
    }
    self.roles.save(Role::new(user_id, role_name)).await
  }

  pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    self.users.find_by_email(email).await
  }

  async fn find_user(&self, id: i64) -> Result<User> {
    self.users.find_by_id(id).await?.ok_or_else(|| {
      warn!("User with ID {} not found.", id);
      AppError::user_not_found(id)
    })
  }
}
