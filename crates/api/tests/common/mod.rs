//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use portal_api::config::ServerConfig;
use portal_api::notifications::DisabledMailer;
use portal_api::router::build_app_router;
use portal_api::state::AppState;
use portal_api::stores::alerts::AlertStore;
use portal_api::stores::limits::LimitsStore;
use portal_api::stores::session::SessionStore;
use portal_ewelink::EwelinkClient;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        public_url: "http://localhost:8000".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
        poll_interval_secs: 60,
        alert_email_to: None,
        ewelink_app_id: "test-app-id".to_string(),
        ewelink_app_secret: "test-app-secret".to_string(),
    }
}

/// Build the full application router with all middleware layers, plus the
/// state behind it.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The state is returned so tests
/// can seed the in-memory stores directly.
pub fn build_test_app() -> (Router, AppState) {
    let config = test_config();

    let state = AppState {
        ewelink: Arc::new(EwelinkClient::new(
            config.ewelink_app_id.clone(),
            config.ewelink_app_secret.clone(),
        )),
        session: Arc::new(SessionStore::new()),
        limits: Arc::new(LimitsStore::new()),
        alerts: Arc::new(AlertStore::new()),
        mailer: Arc::new(DisabledMailer),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state.clone(), &config);
    (app, state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a POST request with an empty body.
pub async fn post(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
