//! Alert notification delivery.
//!
//! The [`Mailer`] trait is the seam between the poller and the outside
//! world: production wires in the SMTP-backed [`email::EmailDelivery`],
//! tests substitute a recording stub, and an unconfigured deployment gets
//! [`DisabledMailer`].

pub mod email;

use email::EmailError;

/// Sends alert notifications to a recipient address.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Whether this mailer can actually deliver anything.
    fn is_enabled(&self) -> bool;

    /// Deliver one plain-text message. Best-effort: callers log failures
    /// and move on.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// No-op mailer used when SMTP is not configured.
pub struct DisabledMailer;

#[async_trait::async_trait]
impl Mailer for DisabledMailer {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), EmailError> {
        tracing::warn!(to, subject, "Email delivery not configured; dropping alert email");
        Ok(())
    }
}
