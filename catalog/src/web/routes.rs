// catalog/src/web/routes.rs

use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, product_handlers, user_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Malformed JSON bodies become a 400 carrying the usual error shape.
fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Malformed JSON body: {}", err)).into()
}

// This function will be called in `build_app` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
        .route("/{product_id}", web::patch().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
    )
    .service(
      web::scope("/users")
        .route("", web::post().to(user_handlers::register_user_handler))
        .route("/{user_id}", web::patch().to(user_handlers::update_user_handler))
        .route("/{user_id}", web::delete().to(user_handlers::delete_user_handler)),
    )
    .route("/session", web::post().to(auth_handlers::login_handler));
}
