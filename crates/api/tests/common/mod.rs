#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use armory_api::config::ServerConfig;
use armory_api::router::build_app_router;
use armory_api::state::AppState;
use armory_core::storage::StorageConfig;

/// Admin secret configured for every test app.
pub const ADMIN_SECRET: &str = "test-admin-secret";

/// Storage base URL configured for every test app.
pub const STORAGE_URL: &str = "https://cdn.test";

/// Build a test `ServerConfig` with the admin gate and storage configured.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_secret: Some(ADMIN_SECRET.to_string()),
        admin_cookie_secure: false,
        storage: StorageConfig::new(Some(STORAGE_URL.to_string()), "product-images"),
        default_diagram_size_px: 1000,
    }
}

/// Build the full application router, same middleware stack as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

fn admin_cookie() -> String {
    format!("admin_secret={ADMIN_SECRET}")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    admin: bool,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if admin {
        builder = builder.header("cookie", admin_cookie());
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, false).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), false).await
}

pub async fn admin_get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, true).await
}

pub async fn admin_post(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), true).await
}

pub async fn admin_put(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), true).await
}

pub async fn admin_delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, true).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a record through the admin API and return its `data.id`.
pub async fn seed(pool: &PgPool, uri: &str, body: serde_json::Value) -> String {
    let response = admin_post(build_test_app(pool.clone()), uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert!(status.is_success(), "seeding {uri} failed: {status} {json}");
    json["data"]["id"].as_str().unwrap().to_string()
}
