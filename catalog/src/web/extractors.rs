// catalog/src/web/extractors.rs

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::errors::AppError;
use crate::models::Role;
use crate::state::AppState;

/// Identity of the caller, taken from `Authorization: Bearer <token>`.
///
/// Adding this extractor to a handler makes the route require a valid token;
/// the request is rejected with 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: i64,
  pub roles: Vec<Role>,
}

impl AuthenticatedUser {
  pub fn has_role(&self, name: &str) -> bool {
    self.roles.iter().any(|role| role.name == name)
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let app_state = req.app_data::<web::Data<AppState>>().cloned();
    let token = bearer_token(req);

    Box::pin(async move {
      let app_state =
        app_state.ok_or_else(|| AppError::Internal("Application state is not registered.".to_string()))?;
      let token = token.ok_or_else(|| {
        warn!("AuthenticatedUser extractor: Missing or malformed Authorization header.");
        AppError::InvalidToken("Authorization header with a bearer token is required.".to_string())
      })?;

      let user_id = app_state.auth.parse_token(&token)?;
      let roles = app_state.auth.roles(user_id).await?;
      Ok(AuthenticatedUser { user_id, roles })
    })
  }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
  let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  let token = value.strip_prefix("Bearer ")?.trim();
  if token.is_empty() {
    return None;
  }
  Some(token.to_string())
}
