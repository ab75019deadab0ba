//! Per-device alert bound configuration.
//!
//! Bounds live only in memory and are not tied to the vendor session, so
//! these endpoints work (and survive) independently of login state.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use portal_core::limits::DeviceLimits;

use crate::state::AppState;

/// GET /api/devices/{id}/limits -- bounds for one device.
///
/// A device with nothing configured yields the empty record.
async fn get_limits(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Json<DeviceLimits> {
    Json(state.limits.get(&device_id).await)
}

/// PUT /api/devices/{id}/limits -- replace the bounds for one device.
///
/// The stored record is replaced wholesale; omitted bounds are cleared
/// (last-write-wins). Echoes the stored record.
async fn put_limits(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(limits): Json<DeviceLimits>,
) -> Json<DeviceLimits> {
    state.limits.set(device_id.clone(), limits.clone()).await;

    tracing::info!(device_id = %device_id, "Device limits updated");
    Json(limits)
}

/// GET /api/limits -- all configured bounds, keyed by device ID.
async fn all_limits(State(state): State<AppState>) -> Json<HashMap<String, DeviceLimits>> {
    Json(state.limits.all().await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/devices/{id}/limits", get(get_limits).put(put_limits))
        .route("/limits", get(all_limits))
}
