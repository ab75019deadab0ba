use std::collections::HashMap;

use portal_core::limits::DeviceLimits;
use tokio::sync::RwLock;

/// Per-device alert bounds, keyed by device ID.
///
/// Purely in-memory: limits reset on restart. Writes replace the whole
/// record for a device (last-write-wins, no merging).
#[derive(Default)]
pub struct LimitsStore {
    limits: RwLock<HashMap<String, DeviceLimits>>,
}

impl LimitsStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bounds for one device.
    pub async fn set(&self, device_id: String, limits: DeviceLimits) {
        self.limits.write().await.insert(device_id, limits);
    }

    /// Bounds for one device. A device with none configured reads as the
    /// empty record.
    pub async fn get(&self, device_id: &str) -> DeviceLimits {
        self.limits
            .read()
            .await
            .get(device_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of every device's configured bounds.
    pub async fn all(&self) -> HashMap<String, DeviceLimits> {
        self.limits.read().await.clone()
    }
}
