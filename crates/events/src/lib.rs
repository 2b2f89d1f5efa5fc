//! Outbound patient and staff notifications.
//!
//! - [`delivery`]: the [`Mailer`] seam and its SMTP implementation.
//! - [`templates`]: bilingual HTML bodies for consultation and booking mail.
//! - [`BookingNotifier`]: fire-and-forget dispatch used by the API handlers.

pub mod delivery;
pub mod notifier;
pub mod templates;

pub use delivery::email::{EmailConfig, EmailError, SmtpMailer};
pub use delivery::{Mailer, OutgoingEmail};
pub use notifier::BookingNotifier;
pub use templates::{BookingEmail, ConsultationEmail, RenderedEmail};
