#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use studio_api::auth::jwt::JwtConfig;
use studio_api::config::{LogFormat, ServerConfig};
use studio_api::router::build_app_router;
use studio_api::state::AppState;

pub const TEST_PASSWORD: &str = "correct-horse";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        body_limit_bytes: 10 * 1024 * 1024,
        database_url: String::new(),
        database_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 1,
        },
        demo_login_enabled: false,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: Arc::clone(&config),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Register a user through the API and return its token.
pub async fn register(app: &Router, email: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/auth/register",
        serde_json::json!({ "name": "Test User", "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Create a project through the API and return its id.
pub async fn create_project(app: &Router, token: &str, name: &str) -> String {
    let response = post_json_auth(
        app.clone(),
        "/api/projects",
        token,
        serde_json::json!({ "name": name }),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["data"]["project"]["id"].as_str().unwrap().to_string()
}

/// Create a track through the API and return the full track JSON.
pub async fn create_track(app: &Router, token: &str, project_id: &str, body: Value) -> Value {
    let mut body = body;
    body["project_id"] = Value::String(project_id.to_string());
    let response = post_json_auth(app.clone(), "/api/tracks", token, body).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["data"]["track"].clone()
}
