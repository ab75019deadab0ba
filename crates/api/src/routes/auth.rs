//! OAuth login flow against the eWeLink cloud.
//!
//! `/auth/login` sends the browser to the vendor's hosted consent page;
//! `/auth/callback` receives the authorization code, exchanges it for a
//! token pair and stores the session. The session itself is inspected by
//! the frontend via `/api/session`.

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::stores::session::Session;

/// Query parameters eWeLink appends to the OAuth redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub region: Option<String>,
    pub state: Option<String>,
}

/// GET /auth/login -- redirect the browser to the hosted consent page.
///
/// Generates a fresh `state` nonce for this login attempt; the callback
/// must echo it back.
async fn login(State(state): State<AppState>) -> Redirect {
    let oauth_state = state.session.begin_login().await;
    let url = state
        .ewelink
        .login_url(&state.config.oauth_redirect_url(), &oauth_state);

    tracing::info!("Starting eWeLink OAuth login");
    Redirect::temporary(&url)
}

/// GET /auth/callback -- complete the login.
///
/// Verifies the echoed `state` nonce (one-shot), exchanges the code for
/// tokens, stores the session and sends the browser back to the frontend.
async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Redirect> {
    let code = query
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;
    let region = query
        .region
        .ok_or_else(|| AppError::BadRequest("Missing region".to_string()))?;

    let echoed = query.state.unwrap_or_default();
    if !state.session.take_state(&echoed).await {
        return Err(AppError::BadRequest("OAuth state mismatch".to_string()));
    }

    let tokens = state
        .ewelink
        .exchange_code(&region, &code, &state.config.oauth_redirect_url())
        .await?;

    state
        .session
        .set(Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            region: region.clone(),
        })
        .await;

    tracing::info!(region = %region, "eWeLink login completed");
    Ok(Redirect::temporary(&state.config.frontend_url))
}

/// GET /api/session -- current login state.
async fn session_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = state.session.get().await;

    Json(serde_json::json!({
        "loggedIn": session.is_some(),
        "region": session.map(|s| s.region),
    }))
}

/// OAuth entry points, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
}

/// Session introspection, mounted under `/api`.
pub fn session_router() -> Router<AppState> {
    Router::new().route("/session", get(session_info))
}
