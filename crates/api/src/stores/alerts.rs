use portal_core::alert::Alert;
use portal_core::types::AlertId;
use tokio::sync::Mutex;

/// Active alerts raised by the telemetry poller.
///
/// IDs come from a process-scoped monotonic counter starting at 1. Alerts
/// leave the store only through explicit dismissal or a restart; a cleared
/// breach condition does not remove them.
pub struct AlertStore {
    inner: Mutex<Inner>,
}

struct Inner {
    alerts: Vec<Alert>,
    next_id: AlertId,
}

impl AlertStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                alerts: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Record a new alert unless an active one already covers the same
    /// `(device_id, message)` pair. Returns the stored alert when one was
    /// added.
    ///
    /// The duplicate check and the insert happen under one lock, so
    /// overlapping poll cycles cannot double-report a breach.
    pub async fn record(&self, device_id: &str, device_name: &str, message: &str) -> Option<Alert> {
        let mut inner = self.inner.lock().await;

        let duplicate = inner
            .alerts
            .iter()
            .any(|a| a.device_id == device_id && a.original_message == message);
        if duplicate {
            return None;
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let alert = Alert::new(id, device_id, device_name, message);
        inner.alerts.push(alert.clone());
        Some(alert)
    }

    /// All active alerts, in insertion order.
    pub async fn list(&self) -> Vec<Alert> {
        self.inner.lock().await.alerts.clone()
    }

    /// Dismiss an alert by ID. Returns `false` when no active alert has
    /// that ID.
    pub async fn dismiss(&self, id: AlertId) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.alerts.len();
        inner.alerts.retain(|a| a.id != id);
        inner.alerts.len() != before
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}
