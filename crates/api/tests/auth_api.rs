//! Integration tests for the OAuth login flow and session introspection.
//!
//! The code-for-token exchange needs the real vendor cloud, so these tests
//! cover everything up to that point: the login redirect, the `state`
//! nonce lifecycle, callback parameter validation, and `/api/session`.

mod common;

use std::collections::HashMap;

use axum::http::StatusCode;
use common::{body_json, get};
use portal_api::stores::session::Session;

fn location_params(location: &str) -> HashMap<String, String> {
    let url = reqwest::Url::parse(location).expect("Location should be a valid URL");
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// ---------------------------------------------------------------------------
// Test: GET /auth/login redirects to the vendor consent page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_redirects_to_vendor_consent_page() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/auth/login").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .expect("Missing Location header")
        .to_str()
        .unwrap();
    assert!(
        location.starts_with("https://c2ccdn.coolkit.cc/oauth/index.html?"),
        "unexpected redirect target: {location}"
    );

    let params = location_params(location);
    assert_eq!(params["clientId"], "test-app-id");
    assert_eq!(params["grantType"], "authorization_code");
    assert_eq!(
        params["redirectUrl"],
        "http://localhost:8000/auth/callback"
    );
    assert!(!params["state"].is_empty());
    assert!(!params["authorization"].is_empty());
}

// ---------------------------------------------------------------------------
// Test: the state nonce from the redirect is stored, and is one-shot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_state_nonce_is_stored_one_shot() {
    let (app, state) = common::build_test_app();
    let response = get(app, "/auth/login").await;

    let location = response.headers()["location"].to_str().unwrap();
    let nonce = location_params(location)["state"].clone();

    // First take matches; the nonce is consumed by it.
    assert!(state.session.take_state(&nonce).await);
    assert!(!state.session.take_state(&nonce).await);
}

// ---------------------------------------------------------------------------
// Test: a new login invalidates the previous pending nonce
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_login_replaces_pending_nonce() {
    let (app, state) = common::build_test_app();

    let first = get(app.clone(), "/auth/login").await;
    let first_nonce =
        location_params(first.headers()["location"].to_str().unwrap())["state"].clone();

    let second = get(app, "/auth/login").await;
    let second_nonce =
        location_params(second.headers()["location"].to_str().unwrap())["state"].clone();

    assert_ne!(first_nonce, second_nonce);
    assert!(!state.session.take_state(&first_nonce).await);
    assert!(state.session.take_state(&second_nonce).await);
}

// ---------------------------------------------------------------------------
// Test: callback validation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn callback_without_code_is_rejected() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/auth/callback?region=eu&state=whatever").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn callback_without_region_is_rejected() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/auth/callback?code=abc&state=whatever").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn callback_with_unknown_state_is_rejected() {
    let (app, _state) = common::build_test_app();

    // No login was started, so any echoed state must fail the check.
    let response = get(app, "/auth/callback?code=abc&region=eu&state=forged").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "OAuth state mismatch");
}

// ---------------------------------------------------------------------------
// Test: GET /api/session reflects the stored session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_reports_logged_out_by_default() {
    let (app, _state) = common::build_test_app();
    let response = get(app, "/api/session").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["loggedIn"], false);
    assert!(json["region"].is_null());
}

#[tokio::test]
async fn session_reports_region_once_logged_in() {
    let (app, state) = common::build_test_app();

    state
        .session
        .set(Session {
            access_token: "at-123".to_string(),
            refresh_token: "rt-456".to_string(),
            region: "eu".to_string(),
        })
        .await;

    let response = get(app, "/api/session").await;
    let json = body_json(response).await;

    assert_eq!(json["loggedIn"], true);
    assert_eq!(json["region"], "eu");
}
