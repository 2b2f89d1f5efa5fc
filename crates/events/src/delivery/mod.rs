//! Delivery channels for outbound notifications.

pub mod email;

use async_trait::async_trait;

use email::EmailError;

/// A fully rendered HTML message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Sends a single message. Implemented by [`email::SmtpMailer`] and by
/// recording fakes in tests.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: OutgoingEmail) -> Result<(), EmailError>;
}
