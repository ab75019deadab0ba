/// Server configuration loaded from environment variables.
///
/// All fields except the eWeLink app credentials have defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL of this backend; the OAuth redirect target is
    /// `{public_url}/auth/callback`.
    pub public_url: String,
    /// Frontend URL the browser is sent back to after a completed login.
    pub frontend_url: String,
    /// Telemetry poll interval in seconds (default: `60`).
    pub poll_interval_secs: u64,
    /// Recipient for alert emails. `None` skips alert mail entirely.
    pub alert_email_to: Option<String>,
    /// eWeLink OAuth app ID.
    pub ewelink_app_id: String,
    /// eWeLink OAuth app secret, used for request signing.
    pub ewelink_app_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `0.0.0.0`                     |
    /// | `PORT`                 | `8000`                        |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `PUBLIC_URL`           | `http://localhost:8000`       |
    /// | `FRONTEND_URL`         | `http://localhost:3000`       |
    /// | `POLL_INTERVAL_SECS`   | `60`                          |
    /// | `ALERT_EMAIL_TO`       | falls back to `SMTP_USER`     |
    /// | `EWELINK_APP_ID`       | required                      |
    /// | `EWELINK_APP_SECRET`   | required                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .trim_end_matches('/')
            .to_string();

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        let alert_email_to = std::env::var("ALERT_EMAIL_TO")
            .ok()
            .or_else(|| std::env::var("SMTP_USER").ok());

        let ewelink_app_id =
            std::env::var("EWELINK_APP_ID").expect("EWELINK_APP_ID must be set");
        let ewelink_app_secret =
            std::env::var("EWELINK_APP_SECRET").expect("EWELINK_APP_SECRET must be set");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_url,
            frontend_url,
            poll_interval_secs,
            alert_email_to,
            ewelink_app_id,
            ewelink_app_secret,
        }
    }

    /// The OAuth redirect target eWeLink sends the browser back to.
    pub fn oauth_redirect_url(&self) -> String {
        format!("{}/auth/callback", self.public_url)
    }
}
