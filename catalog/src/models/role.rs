// catalog/src/models/role.rs

use serde::Serialize;
use sqlx::FromRow;

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// A role name granted to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
}

impl Role {
  pub fn new(user_id: i64, name: impl Into<String>) -> Self {
    Self {
      id: 0,
      user_id,
      name: name.into(),
    }
  }
}
