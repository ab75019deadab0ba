//! Device list and control proxies.
//!
//! Both endpoints act on the stored eWeLink session and fail with 401 when
//! nobody is logged in. Responses keep the vendor's `{error, msg, data}`
//! envelope so the frontend consumes them unchanged.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use portal_core::error::CoreError;
use portal_ewelink::types::{ApiResponse, ThingList};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::stores::session::Session;

/// Request body for `POST /devices/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// New device parameters, passed to the vendor as-is
    /// (e.g. `{ "switch": "on" }`).
    pub params: Option<serde_json::Value>,
}

/// Fetch the current session, or fail with 401.
async fn require_session(state: &AppState) -> AppResult<Session> {
    state
        .session
        .get()
        .await
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not logged in".to_string())))
}

/// GET /api/devices -- list every device visible to the session.
async fn list_devices(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ThingList>>> {
    let session = require_session(&state).await?;

    let things = state
        .ewelink
        .get_all_things(&session.region, &session.access_token)
        .await?;

    Ok(Json(ApiResponse {
        error: 0,
        msg: String::new(),
        data: Some(things),
    }))
}

/// POST /api/devices/{id}/status -- send new parameters to one device.
///
/// The vendor's response envelope is returned verbatim, vendor error codes
/// included, so the frontend sees exactly what eWeLink reported.
async fn set_device_status(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let session = require_session(&state).await?;

    let params = request
        .params
        .ok_or_else(|| AppError::BadRequest("Missing params".to_string()))?;

    let response = state
        .ewelink
        .set_thing_status(&session.region, &session.access_token, &device_id, &params)
        .await?;

    Ok(Json(response))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/devices", get(list_devices))
        .route("/devices/{id}/status", post(set_device_status))
}
