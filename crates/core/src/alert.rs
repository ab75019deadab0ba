//! Alert records for detected threshold breaches.

use serde::Serialize;

use crate::types::{AlertId, Timestamp};

/// A stored breach awaiting dismissal.
///
/// `original_message` is the evaluator's verbatim output and is the dedup
/// key together with `device_id`: the store keeps at most one active alert
/// per `(device_id, original_message)` pair. `message` prefixes the device
/// name for display and email bodies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub device_id: String,
    pub device_name: String,
    pub message: String,
    pub original_message: String,
    pub created_at: Timestamp,
}

impl Alert {
    /// Build an alert from the evaluator's breach message.
    pub fn new(
        id: AlertId,
        device_id: impl Into<String>,
        device_name: impl Into<String>,
        original_message: impl Into<String>,
    ) -> Self {
        let device_name = device_name.into();
        let original_message = original_message.into();
        Self {
            id,
            device_id: device_id.into(),
            message: format!("{device_name}: {original_message}"),
            device_name,
            original_message,
            created_at: chrono::Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
