// tests/product_api_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use catalog::models::Product;
use catalog::web::build_app;
use common::*;
use serde_json::{json, Value};

async fn body_string(resp: actix_web::dev::ServiceResponse) -> String {
  let bytes = test::read_body(resp).await;
  String::from_utf8(bytes.to_vec()).expect("response body should be UTF-8")
}

#[actix_web::test]
async fn test_list_returns_all_products() {
  setup_tracing();
  let state = test_state();
  seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  seed_product(&state, "Feather Wand", "PawLab", 7500).await;
  let app = test::init_service(build_app(state)).await;

  let req = test::TestRequest::get().uri("/products").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let products: Vec<Product> = test::read_body_json(resp).await;
  assert_eq!(products.len(), 2);
  assert_eq!(products[0].name, "Mouse Toy");
  assert_eq!(products[1].maker, "PawLab");
}

#[actix_web::test]
async fn test_list_with_empty_catalog_returns_empty_array() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::get().uri("/products").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_string(resp).await, "[]");
}

#[actix_web::test]
async fn test_detail_with_existing_product() {
  setup_tracing();
  let state = test_state();
  let product = seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  let app = test::init_service(build_app(state)).await;

  let req = test::TestRequest::get()
    .uri(&format!("/products/{}", product.id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["id"], product.id);
  assert_eq!(body["name"], "Mouse Toy");
  assert_eq!(body["price"], 5000);
  // Absent image URLs are omitted rather than sent as null.
  assert!(body.get("imageUrl").is_none());
}

#[actix_web::test]
async fn test_detail_with_missing_product_is_not_found() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::get().uri("/products/1000").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_with_valid_attributes() {
  setup_tracing();
  let state = test_state();
  let app = test::init_service(build_app(state.clone())).await;

  let req = test::TestRequest::post()
    .uri("/products")
    .insert_header(bearer(VALID_TOKEN))
    .set_json(json!({
      "name": "Cat",
      "maker": "CatWorld",
      "price": 5000,
      "imageUrl": "https://example.com/images/cat.png"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = body_string(resp).await;
  assert!(body.contains("\"name\":\"Cat\""), "unexpected body: {}", body);

  let created: Product = serde_json::from_str(&body).unwrap();
  assert!(created.id > 0);
  assert_eq!(created.maker, "CatWorld");
  assert_eq!(created.price, 5000);
  assert_eq!(created.image_url.as_deref(), Some("https://example.com/images/cat.png"));

  let stored = state.products.get_product(created.id).await.unwrap();
  assert_eq!(stored, created);
}

#[actix_web::test]
async fn test_create_without_image_url() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::post()
    .uri("/products")
    .insert_header(bearer(VALID_TOKEN))
    .set_json(json!({"name": "Cat", "maker": "CatWorld", "price": 5000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = body_string(resp).await;
  assert!(body.contains("\"name\":\"Cat\""));
  assert!(!body.contains("imageUrl"));
}

#[actix_web::test]
async fn test_create_with_invalid_attributes_is_bad_request() {
  setup_tracing();
  let state = test_state();
  let app = test::init_service(build_app(state.clone())).await;

  let payloads = [
    json!({"name": "", "maker": "", "price": 0}),
    json!({"name": "", "maker": "CatWorld", "price": 5000}),
    json!({"name": "Cat", "maker": "  ", "price": 5000}),
    json!({"name": "Cat", "maker": "CatWorld", "price": 0}),
    json!({"name": "Cat", "maker": "CatWorld", "price": -100}),
    json!({"name": "Cat", "maker": "CatWorld"}),
  ];
  for payload in payloads {
    let req = test::TestRequest::post()
      .uri("/products")
      .insert_header(bearer(VALID_TOKEN))
      .set_json(&payload)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
  }

  assert!(state.products.get_products().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_with_malformed_json_is_bad_request() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::post()
    .uri("/products")
    .insert_header(bearer(VALID_TOKEN))
    .insert_header(("Content-Type", "application/json"))
    .set_payload("{\"name\": \"Cat\", ")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().unwrap().contains("Malformed JSON body"));
}

#[actix_web::test]
async fn test_create_without_access_token_is_unauthorized() {
  setup_tracing();
  let state = test_state();
  let app = test::init_service(build_app(state.clone())).await;

  let req = test::TestRequest::post()
    .uri("/products")
    .set_json(json!({"name": "Cat", "maker": "CatWorld", "price": 5000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(state.products.get_products().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_with_invalid_access_token_is_unauthorized() {
  setup_tracing();
  let state = test_state();
  let app = test::init_service(build_app(state.clone())).await;

  for token in [INVALID_TOKEN, "not-a-jwt", ""] {
    let req = test::TestRequest::post()
      .uri("/products")
      .insert_header(bearer(token))
      .set_json(json!({"name": "Cat", "maker": "CatWorld", "price": 5000}))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "token: {:?}", token);
  }

  // A token without the Bearer scheme is treated as missing.
  let req = test::TestRequest::post()
    .uri("/products")
    .insert_header(("Authorization", VALID_TOKEN))
    .set_json(json!({"name": "Cat", "maker": "CatWorld", "price": 5000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  assert!(state.products.get_products().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_rejected_token_is_not_echoed_in_the_response() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::post()
    .uri("/products")
    .insert_header(bearer(INVALID_TOKEN))
    .set_json(json!({"name": "Cat", "maker": "CatWorld", "price": 5000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let body = body_string(resp).await;
  assert!(!body.contains(INVALID_TOKEN), "token leaked in body: {}", body);
  assert!(!body.contains("eyJ"), "token fragment leaked in body: {}", body);
}

#[actix_web::test]
async fn test_invalid_token_is_checked_before_the_payload() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::post()
    .uri("/products")
    .insert_header(bearer(INVALID_TOKEN))
    .set_json(json!({"name": "", "maker": "", "price": 0}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_update_with_existing_product() {
  setup_tracing();
  let state = test_state();
  let product = seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  let app = test::init_service(build_app(state.clone())).await;

  let req = test::TestRequest::patch()
    .uri(&format!("/products/{}", product.id))
    .insert_header(bearer(VALID_TOKEN))
    .set_json(json!({"name": "Mouse Toy v2", "maker": "CatWorld", "price": 6000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let updated: Product = test::read_body_json(resp).await;
  assert_eq!(updated.id, product.id);
  assert_eq!(updated.name, "Mouse Toy v2");
  assert_eq!(updated.price, 6000);

  let stored = state.products.get_product(product.id).await.unwrap();
  assert_eq!(stored, updated);
}

#[actix_web::test]
async fn test_update_replaces_image_url() {
  setup_tracing();
  let state = test_state();
  let product = state
    .products
    .create_product(catalog::models::ProductData {
      image_url: Some("https://example.com/old.png".to_string()),
      ..product_data("Mouse Toy", "CatWorld", 5000)
    })
    .await
    .unwrap();
  let app = test::init_service(build_app(state.clone())).await;

  let req = test::TestRequest::put()
    .uri(&format!("/products/{}", product.id))
    .insert_header(bearer(VALID_TOKEN))
    .set_json(json!({"name": "Mouse Toy", "maker": "CatWorld", "price": 5000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let stored = state.products.get_product(product.id).await.unwrap();
  assert_eq!(stored.image_url, None);
}

#[actix_web::test]
async fn test_update_with_missing_product_is_not_found() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::patch()
    .uri("/products/1000")
    .insert_header(bearer(VALID_TOKEN))
    .set_json(json!({"name": "Mouse Toy", "maker": "CatWorld", "price": 5000}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_with_invalid_attributes_is_bad_request() {
  setup_tracing();
  let state = test_state();
  let product = seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  let app = test::init_service(build_app(state.clone())).await;

  let req = test::TestRequest::patch()
    .uri(&format!("/products/{}", product.id))
    .insert_header(bearer(VALID_TOKEN))
    .set_json(json!({"name": "", "maker": "", "price": 0}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let stored = state.products.get_product(product.id).await.unwrap();
  assert_eq!(stored, product);
}

#[actix_web::test]
async fn test_update_without_or_with_invalid_access_token_is_unauthorized() {
  setup_tracing();
  let state = test_state();
  let product = seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  let app = test::init_service(build_app(state.clone())).await;
  let uri = format!("/products/{}", product.id);
  let payload = json!({"name": "Stolen", "maker": "CatWorld", "price": 1});

  let req = test::TestRequest::patch().uri(&uri).set_json(&payload).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::patch()
    .uri(&uri)
    .insert_header(bearer(INVALID_TOKEN))
    .set_json(&payload)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let stored = state.products.get_product(product.id).await.unwrap();
  assert_eq!(stored.name, "Mouse Toy");
}

#[actix_web::test]
async fn test_destroy_with_existing_product() {
  setup_tracing();
  let state = test_state();
  let product = seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  let app = test::init_service(build_app(state.clone())).await;

  let req = test::TestRequest::delete()
    .uri(&format!("/products/{}", product.id))
    .insert_header(bearer(VALID_TOKEN))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri(&format!("/products/{}", product.id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_destroy_with_missing_product_is_not_found() {
  setup_tracing();
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::delete()
    .uri("/products/1000")
    .insert_header(bearer(VALID_TOKEN))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_destroy_without_or_with_invalid_access_token_is_unauthorized() {
  setup_tracing();
  let state = test_state();
  let product = seed_product(&state, "Mouse Toy", "CatWorld", 5000).await;
  let app = test::init_service(build_app(state.clone())).await;
  let uri = format!("/products/{}", product.id);

  let req = test::TestRequest::delete().uri(&uri).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::delete()
    .uri(&uri)
    .insert_header(bearer(INVALID_TOKEN))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  assert!(state.products.get_product(product.id).await.is_ok());
}

#[actix_web::test]
async fn test_health_check() {
  let app = test::init_service(build_app(test_state())).await;

  let req = test::TestRequest::get().uri("/health").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"status": "ok"}));
}
