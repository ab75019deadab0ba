//! Active alert listing and dismissal.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use portal_core::alert::Alert;
use portal_core::error::CoreError;
use portal_core::types::AlertId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/alerts -- all active alerts, in insertion order.
async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.alerts.list().await)
}

/// POST /api/alerts/{id}/dismiss -- drop one alert.
///
/// Returns 204 No Content on success, or 404 if no active alert has that
/// ID (including an already-dismissed one).
async fn dismiss_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<AlertId>,
) -> AppResult<impl IntoResponse> {
    let removed = state.alerts.dismiss(alert_id).await;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }));
    }

    tracing::info!(alert_id, "Alert dismissed");
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(list_alerts))
        .route("/alerts/{id}/dismiss", post(dismiss_alert))
}
