// catalog/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::role::ROLE_ADMIN;
use crate::models::{UserModificationData, UserRegistrationData, UserResultData};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::register_user", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn register_user_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<UserRegistrationData>,
) -> Result<HttpResponse, AppError> {
  let user = app_state.users.register_user(req_payload.into_inner()).await?;
  info!(user_id = user.id, "Signup successful.");
  Ok(HttpResponse::Created().json(UserResultData::from(user)))
}

#[instrument(
    name = "handler::update_user",
    skip(app_state, auth_user, path, req_payload),
    fields(caller_id = auth_user.user_id, user_id = %path.as_ref())
)]
pub async fn update_user_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  req_payload: web::Json<UserModificationData>,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .users
    .update_user(path.into_inner(), req_payload.into_inner(), auth_user.user_id)
    .await?;
  Ok(HttpResponse::Ok().json(UserResultData::from(user)))
}

// Admin only.
#[instrument(
    name = "handler::delete_user",
    skip(app_state, auth_user, path),
    fields(caller_id = auth_user.user_id, user_id = %path.as_ref())
)]
pub async fn delete_user_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  if !auth_user.has_role(ROLE_ADMIN) {
    warn!("Non-admin user attempted to delete an account.");
    return Err(AppError::Forbidden("Deleting users requires the ADMIN role.".to_string()));
  }
  app_state.users.delete_user(path.into_inner()).await?;
  Ok(HttpResponse::Ok().finish())
}
