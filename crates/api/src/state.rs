use std::sync::Arc;

use portal_ewelink::EwelinkClient;

use crate::config::ServerConfig;
use crate::notifications::Mailer;
use crate::stores::alerts::AlertStore;
use crate::stores::limits::LimitsStore;
use crate::stores::session::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind `Arc`). The same state
/// is handed to the background poller, so handlers and the poller see one
/// set of stores.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// eWeLink cloud API client.
    pub ewelink: Arc<EwelinkClient>,
    /// The single OAuth session (plus pending login state).
    pub session: Arc<SessionStore>,
    /// Per-device alert bounds.
    pub limits: Arc<LimitsStore>,
    /// Active alerts raised by the telemetry poller.
    pub alerts: Arc<AlertStore>,
    /// Alert email delivery.
    pub mailer: Arc<dyn Mailer>,
}
