pub mod alerts;
pub mod auth;
pub mod devices;
pub mod health;
pub mod limits;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /session                      login state (GET)
///
/// /devices                      device list proxy (GET, requires session)
/// /devices/{id}/status          device control proxy (POST, requires session)
///
/// /devices/{id}/limits          per-device bounds (GET, PUT)
/// /limits                       all configured bounds (GET)
///
/// /alerts                       active alerts (GET)
/// /alerts/{id}/dismiss          dismiss one alert (POST)
/// ```
///
/// The OAuth entry points (`/auth/login`, `/auth/callback`) and `/health`
/// are mounted at the root, next to this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session introspection for the frontend.
        .merge(auth::session_router())
        // Vendor cloud proxies.
        .merge(devices::router())
        // In-memory threshold configuration.
        .merge(limits::router())
        // Alert listing and dismissal.
        .merge(alerts::router())
}
