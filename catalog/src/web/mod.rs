// catalog/src/web/mod.rs

// Declare child modules
pub mod extractors;
pub mod handlers;
pub mod routes;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web as actix_data, App};

use crate::state::AppState;

pub use extractors::AuthenticatedUser;
pub use routes::configure_app_routes;

/// Builds the application with `app_state` shared to every handler.
///
/// Used by the server binary (which adds request tracing on top) and by the
/// integration tests.
pub fn build_app(
  app_state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<BoxBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  App::new()
    .app_data(actix_data::Data::new(app_state))
    .configure(configure_app_routes)
}
