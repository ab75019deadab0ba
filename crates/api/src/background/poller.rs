//! Telemetry polling and alert generation.
//!
//! Every tick fetches the full device list from the eWeLink cloud, runs
//! the threshold evaluator per device against its stored bounds, records
//! fresh breaches in the alert store and emails each newly raised alert.
//! Ticks are sequential within one task; a slow vendor call delays the
//! next tick rather than overlapping it. All failures are logged and the
//! loop carries on.

use std::time::Duration;

use portal_core::evaluator;
use portal_core::reading::Telemetry;
use portal_ewelink::types::Device;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Run the telemetry poll loop until `cancel` is triggered.
pub async fn run(state: AppState, cancel: CancellationToken) {
    let interval_secs = state.config.poll_interval_secs;
    tracing::info!(interval_secs, "Telemetry poller started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Telemetry poller stopping");
                break;
            }
            _ = interval.tick() => {
                poll_once(&state).await;
            }
        }
    }
}

/// One poll cycle: fetch all devices and evaluate each against its bounds.
///
/// Skipped entirely while nobody is logged in.
pub async fn poll_once(state: &AppState) {
    let Some(session) = state.session.get().await else {
        tracing::debug!("Telemetry poll skipped: not logged in");
        return;
    };

    let things = match state
        .ewelink
        .get_all_things(&session.region, &session.access_token)
        .await
    {
        Ok(list) => list.thing_list,
        Err(e) => {
            tracing::error!(error = %e, "Telemetry poll: device fetch failed");
            return;
        }
    };

    tracing::debug!(devices = things.len(), "Telemetry poll: evaluating devices");

    for thing in &things {
        check_device(state, &thing.item_data).await;
    }
}

/// Evaluate one device and record/notify on a fresh breach.
async fn check_device(state: &AppState, device: &Device) {
    let limits = state.limits.get(&device.device_id).await;
    if limits.is_empty() {
        return;
    }

    let telemetry = Telemetry::from_params(&device.params);
    let Some(message) = evaluator::evaluate(&telemetry, &limits) else {
        return;
    };

    // The store keeps at most one active alert per (device, message).
    let Some(alert) = state
        .alerts
        .record(&device.device_id, &device.name, &message)
        .await
    else {
        return;
    };

    tracing::info!(
        device_id = %alert.device_id,
        alert_id = alert.id,
        message = %alert.original_message,
        "Alert raised"
    );

    let Some(to) = state.config.alert_email_to.as_deref() else {
        tracing::debug!(alert_id = alert.id, "No alert recipient configured; email skipped");
        return;
    };

    let subject = format!("SONOFF Alert: {}", alert.device_name);
    if let Err(e) = state.mailer.send(to, &subject, &alert.message).await {
        tracing::error!(error = %e, alert_id = alert.id, "Alert email failed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portal_ewelink::EwelinkClient;
    use serde_json::json;

    use super::*;
    use crate::config::ServerConfig;
    use crate::notifications::email::EmailError;
    use crate::notifications::Mailer;
    use crate::stores::alerts::AlertStore;
    use crate::stores::limits::LimitsStore;
    use crate::stores::session::SessionStore;
    use portal_core::limits::DeviceLimits;

    /// Mailer stub that records every send instead of talking SMTP.
    #[derive(Default)]
    struct RecordingMailer {
        sent: tokio::sync::Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait::async_trait]
    impl Mailer for RecordingMailer {
        fn is_enabled(&self) -> bool {
            true
        }

        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
            self.sent
                .lock()
                .await
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn test_state(recipient: Option<&str>) -> (AppState, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::default());
        let mailer_dyn: Arc<dyn Mailer> = mailer.clone();

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 30,
            public_url: "http://localhost:8000".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            poll_interval_secs: 60,
            alert_email_to: recipient.map(String::from),
            ewelink_app_id: "test-app-id".to_string(),
            ewelink_app_secret: "test-app-secret".to_string(),
        };

        let state = AppState {
            config: Arc::new(config),
            ewelink: Arc::new(EwelinkClient::new(
                "test-app-id".to_string(),
                "test-app-secret".to_string(),
            )),
            session: Arc::new(SessionStore::new()),
            limits: Arc::new(LimitsStore::new()),
            alerts: Arc::new(AlertStore::new()),
            mailer: mailer_dyn,
        };

        (state, mailer)
    }

    fn sensor_device(device_id: &str, name: &str, temperature: &str) -> Device {
        Device {
            name: name.to_string(),
            device_id: device_id.to_string(),
            online: true,
            params: json!({ "currentTemperature": temperature, "currentHumidity": "50" }),
            extra: None,
        }
    }

    #[tokio::test]
    async fn breach_records_alert_and_sends_email() {
        let (state, mailer) = test_state(Some("ops@example.com"));
        state
            .limits
            .set(
                "dev-1".to_string(),
                DeviceLimits {
                    temp_high: Some(30.0),
                    ..Default::default()
                },
            )
            .await;

        check_device(&state, &sensor_device("dev-1", "Greenhouse", "32")).await;

        let alerts = state.alerts.list().await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(
            alerts[0].original_message,
            "Temperature is too HIGH: 32°C (Your limit is 30°C)."
        );

        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        let (to, subject, body) = &sent[0];
        assert_eq!(to, "ops@example.com");
        assert_eq!(subject, "SONOFF Alert: Greenhouse");
        assert_eq!(
            body,
            "Greenhouse: Temperature is too HIGH: 32°C (Your limit is 30°C)."
        );
    }

    #[tokio::test]
    async fn repeated_breach_sends_a_single_email() {
        let (state, mailer) = test_state(Some("ops@example.com"));
        state
            .limits
            .set(
                "dev-1".to_string(),
                DeviceLimits {
                    temp_high: Some(30.0),
                    ..Default::default()
                },
            )
            .await;

        let device = sensor_device("dev-1", "Greenhouse", "32");
        check_device(&state, &device).await;
        check_device(&state, &device).await;

        assert_eq!(state.alerts.list().await.len(), 1);
        assert_eq!(mailer.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn device_without_limits_is_skipped() {
        let (state, mailer) = test_state(Some("ops@example.com"));

        check_device(&state, &sensor_device("dev-1", "Greenhouse", "99")).await;

        assert!(state.alerts.list().await.is_empty());
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unavailable_reading_raises_nothing() {
        let (state, mailer) = test_state(Some("ops@example.com"));
        state
            .limits
            .set(
                "dev-1".to_string(),
                DeviceLimits {
                    temp_high: Some(30.0),
                    ..Default::default()
                },
            )
            .await;

        check_device(&state, &sensor_device("dev-1", "Greenhouse", "unavailable")).await;

        assert!(state.alerts.list().await.is_empty());
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn missing_recipient_records_alert_without_email() {
        let (state, mailer) = test_state(None);
        state
            .limits
            .set(
                "dev-1".to_string(),
                DeviceLimits {
                    temp_high: Some(30.0),
                    ..Default::default()
                },
            )
            .await;

        check_device(&state, &sensor_device("dev-1", "Greenhouse", "32")).await;

        assert_eq!(state.alerts.list().await.len(), 1);
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn poll_skips_entirely_when_logged_out() {
        let (state, mailer) = test_state(Some("ops@example.com"));

        // No session stored: the tick must return without touching the
        // vendor API or the stores.
        poll_once(&state).await;

        assert!(state.alerts.list().await.is_empty());
        assert!(mailer.sent.lock().await.is_empty());
    }
}
