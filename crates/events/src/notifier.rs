//! Fire-and-forget booking notifications.
//!
//! Each dispatch renders a patient email and a staff email and spawns one
//! send task per message, so a slow or failing patient send never holds up
//! the staff notice. Failures are logged and dropped; the HTTP caller never
//! waits on or observes delivery.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::delivery::{Mailer, OutgoingEmail};
use crate::templates::{self, BookingEmail, ConsultationEmail, RenderedEmail};

/// Staff inbox used when `ADMIN_NOTIFICATION_EMAIL` is unset.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@shifaalhind.com";

#[derive(Clone)]
pub struct BookingNotifier {
    mailer: Option<Arc<dyn Mailer>>,
    admin_email: String,
}

impl BookingNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: impl Into<String>) -> Self {
        Self {
            mailer: Some(mailer),
            admin_email: admin_email.into(),
        }
    }

    /// A notifier that drops every message. Used when SMTP is not configured.
    pub fn disabled() -> Self {
        Self {
            mailer: None,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Acknowledge a new lead to the patient and alert staff.
    ///
    /// Returns the spawned tasks (patient first) so tests can await them;
    /// handlers drop them. Empty when email is disabled.
    pub fn consultation_received(&self, data: ConsultationEmail) -> Vec<JoinHandle<()>> {
        let patient = templates::consultation_confirmation(&data);
        let admin = templates::admin_consultation_notification(&data);
        self.dispatch("consultation", data.email, patient, admin)
    }

    /// Confirm a booking to the patient and alert staff.
    pub fn booking_confirmed(&self, data: BookingEmail) -> Vec<JoinHandle<()>> {
        let patient = templates::booking_confirmation(&data);
        let admin = templates::admin_booking_notification(&data);
        self.dispatch("booking_confirmed", data.email, patient, admin)
    }

    fn dispatch(
        &self,
        kind: &'static str,
        patient_email: String,
        patient: RenderedEmail,
        admin: RenderedEmail,
    ) -> Vec<JoinHandle<()>> {
        let Some(mailer) = &self.mailer else {
            tracing::debug!(kind, "Email disabled, skipping notification");
            return Vec::new();
        };

        let messages = [
            OutgoingEmail {
                to: patient_email,
                subject: patient.subject,
                html: patient.html,
            },
            OutgoingEmail {
                to: self.admin_email.clone(),
                subject: admin.subject,
                html: admin.html,
            },
        ];

        messages
            .into_iter()
            .map(|message| {
                let mailer = Arc::clone(mailer);
                tokio::spawn(async move {
                    let to = message.to.clone();
                    if let Err(e) = mailer.send(message).await {
                        tracing::warn!(kind, to = %to, error = %e, "Failed to send notification email");
                    }
                })
            })
            .collect()
    }
}
