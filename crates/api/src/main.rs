use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_api::background;
use portal_api::config::ServerConfig;
use portal_api::notifications::email::{EmailConfig, EmailDelivery};
use portal_api::notifications::{DisabledMailer, Mailer};
use portal_api::router::build_app_router;
use portal_api::state::AppState;
use portal_api::stores::alerts::AlertStore;
use portal_api::stores::limits::LimitsStore;
use portal_api::stores::session::SessionStore;
use portal_ewelink::EwelinkClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- eWeLink client ---
    let ewelink = Arc::new(EwelinkClient::new(
        config.ewelink_app_id.clone(),
        config.ewelink_app_secret.clone(),
    ));

    // --- Email ---
    let mailer = build_mailer().await;
    if config.alert_email_to.is_none() {
        tracing::warn!("ALERT_EMAIL_TO not set; alert emails will be skipped");
    }

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        ewelink,
        session: Arc::new(SessionStore::new()),
        limits: Arc::new(LimitsStore::new()),
        alerts: Arc::new(AlertStore::new()),
        mailer,
    };

    // --- Telemetry poller ---
    let poller_cancel = tokio_util::sync::CancellationToken::new();
    let poller_handle = tokio::spawn(background::poller::run(
        state.clone(),
        poller_cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    poller_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), poller_handle).await;
    tracing::info!("Telemetry poller stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Build the alert mailer from SMTP environment variables.
///
/// Falls back to the disabled no-op mailer when SMTP is unconfigured or
/// the transport cannot be built. A failed connection test is logged but
/// keeps the real mailer: the server must come up even while the SMTP
/// host is unreachable.
async fn build_mailer() -> Arc<dyn Mailer> {
    let Some(email_config) = EmailConfig::from_env() else {
        tracing::warn!("SMTP_HOST not set; alert email disabled");
        return Arc::new(DisabledMailer);
    };

    match EmailDelivery::new(email_config) {
        Ok(delivery) => {
            match delivery.verify().await {
                Ok(true) => tracing::info!("SMTP connection verified"),
                Ok(false) => tracing::warn!("SMTP connection test failed"),
                Err(e) => tracing::warn!(error = %e, "SMTP connection test failed"),
            }
            Arc::new(delivery)
        }
        Err(e) => {
            tracing::warn!(error = %e, "SMTP transport setup failed; alert email disabled");
            Arc::new(DisabledMailer)
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
