//! Router tests against the in-memory backend.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use menu_api::{build_router, AppState};
use menu_infrastructure::{MemoryMenuStore, MenuStores};
use menu_shared::config::AppConfig;

fn app() -> Router {
    menu_shared::telemetry::init_test_telemetry();
    let config = AppConfig::load_from("does-not-exist", "test").expect("default config");
    let stores = MenuStores::memory(MemoryMenuStore::new());

    build_router(AppState {
        categories: Arc::new(stores.category_service(&config.ordering)),
        items: Arc::new(stores.item_service(&config.ordering)),
        config: Arc::new(config),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_category(app: &Router, language: &str, title: &str, position: i32) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/menu-categories",
        Some(json!({ "language": language, "title": title, "position": position })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_service() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn reorder_scenario_over_http() {
    let app = app();
    let a = create_category(&app, "en", "Starters", 0).await;
    let b = create_category(&app, "en", "Mains", 1).await;
    let c = create_category(&app, "en", "Desserts", 2).await;
    create_category(&app, "ua", "Супи", 0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/menu-categories/position",
        Some(json!({ "menuCategoryId": b, "oldPosition": 1, "newPosition": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["position"], 0);

    let (status, body) = send(&app, Method::GET, "/api/v1/menu-categories?language=en", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<(String, i64)> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["id"].as_str().unwrap().to_string(), c["position"].as_i64().unwrap()))
        .collect();
    assert_eq!(listed, vec![(b, 0), (a, 1), (c, 2)]);
}

#[tokio::test]
async fn hidden_categories_need_include_hidden() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/menu-categories",
        Some(json!({ "language": "en", "title": "Secret", "position": 0, "hidden": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, "/api/v1/menu-categories?language=en", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/menu-categories?language=en&includeHidden=true",
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/api/v1/menu-categories/all", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn item_lifecycle() {
    let app = app();
    let category = create_category(&app, "en", "Drinks", 0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/menu-items",
        Some(json!({
            "language": "en",
            "title": "Espresso",
            "price": "2.50",
            "position": 0,
            "categoryId": category,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/menu-items/{}", item),
        Some(json!({ "price": "2.80" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "2.80");

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/menu-categories/{}", category), None).await;
    assert_eq!(body["data"]["menuItems"][0]["id"], item.as_str());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/menu-categories/{}/items", category),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Category still owns an item.
    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/menu-categories/{}", category), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/menu-items/{}", item), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], true);
    assert_eq!(body["data"]["message"], format!("Menu item {} successfully deleted", item));

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/menu-items/{}", item), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/menu-categories",
        Some(json!({ "language": "en", "title": "", "position": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/menu-categories",
        Some(json!({ "language": "de", "title": "Suppen", "position": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/menu-categories/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/menu-items",
        Some(json!({
            "language": "en",
            "title": "Orphan",
            "price": "1.00",
            "position": 0,
            "categoryId": "7f1c1f0e-7f7b-4c59-9d2a-2f4e0b2f9a11",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_records_are_not_found() {
    let app = app();
    let missing = "7f1c1f0e-7f7b-4c59-9d2a-2f4e0b2f9a11";

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/menu-items/position",
        Some(json!({ "menuItemId": missing, "oldPosition": 0, "newPosition": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/menu-categories/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/menu-categories/{}", missing),
        Some(json!({ "title": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
