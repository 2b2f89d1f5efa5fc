//! Booking status closed set and status-change planning.
//!
//! A booking is created as [`BookingStatus::Lead`] by the public consultation
//! form and then moved through the remaining statuses by admins. The database
//! column is `TEXT` with a `CHECK` constraint listing the same values as
//! [`BookingStatus::ALL`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Every status a booking can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Unconfirmed consultation request from the public form.
    Lead,
    /// A coordinator has reached out to the patient.
    Contacted,
    /// Treatment booked with a hospital.
    Confirmed,
    /// Patient has arrived and treatment is ongoing.
    InTreatment,
    /// Treatment completed and patient discharged.
    Discharged,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Lead,
        BookingStatus::Contacted,
        BookingStatus::Confirmed,
        BookingStatus::InTreatment,
        BookingStatus::Discharged,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Lead => "LEAD",
            BookingStatus::Contacted => "CONTACTED",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::InTreatment => "IN_TREATMENT",
            BookingStatus::Discharged => "DISCHARGED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!(
                    "Invalid booking status '{s}'. Must be one of: {}",
                    valid.join(", ")
                )
            })
    }
}

/// Result of applying a requested status to a stored booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: BookingStatus,
    pub confirmed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    /// Patient confirmation and admin notification emails should go out.
    pub notify_confirmed: bool,
}

/// Work out the new status and lifecycle timestamps for a status PATCH.
///
/// `confirmed_at` is stamped the first time the booking enters `CONFIRMED`
/// and `completed_at` the first time it enters `DISCHARGED`; stored stamps
/// are never overwritten. Confirmation emails are due only when the booking
/// was not already confirmed.
pub fn plan_status_change(
    current: BookingStatus,
    requested: BookingStatus,
    confirmed_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    now: Timestamp,
) -> StatusChange {
    let confirmed_at = match (requested, confirmed_at) {
        (BookingStatus::Confirmed, None) => Some(now),
        (_, existing) => existing,
    };

    let completed_at = match (requested, completed_at) {
        (BookingStatus::Discharged, None) => Some(now),
        (_, existing) => existing,
    };

    StatusChange {
        status: requested,
        confirmed_at,
        completed_at,
        notify_confirmed: requested == BookingStatus::Confirmed
            && current != BookingStatus::Confirmed,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn parses_every_status_round_trip() {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_and_lowercase_status() {
        let err = "pending".parse::<BookingStatus>().unwrap_err();
        assert!(err.contains("Invalid booking status 'pending'"));
        assert_matches!("confirmed".parse::<BookingStatus>(), Err(_));
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&BookingStatus::InTreatment).unwrap();
        assert_eq!(json, "\"IN_TREATMENT\"");
    }

    #[test]
    fn first_confirmation_stamps_confirmed_at_and_notifies() {
        let change = plan_status_change(
            BookingStatus::Lead,
            BookingStatus::Confirmed,
            None,
            None,
            t0(),
        );
        assert_eq!(change.status, BookingStatus::Confirmed);
        assert_eq!(change.confirmed_at, Some(t0()));
        assert_eq!(change.completed_at, None);
        assert!(change.notify_confirmed);
    }

    #[test]
    fn repeated_confirmation_keeps_original_stamp_and_stays_quiet() {
        let later = t0() + Duration::hours(5);
        let change = plan_status_change(
            BookingStatus::Confirmed,
            BookingStatus::Confirmed,
            Some(t0()),
            None,
            later,
        );
        assert_eq!(change.confirmed_at, Some(t0()));
        assert!(!change.notify_confirmed);
    }

    #[test]
    fn reconfirming_after_cancellation_notifies_but_keeps_stamp() {
        let later = t0() + Duration::days(2);
        let change = plan_status_change(
            BookingStatus::Cancelled,
            BookingStatus::Confirmed,
            Some(t0()),
            None,
            later,
        );
        assert_eq!(change.confirmed_at, Some(t0()));
        assert!(change.notify_confirmed);
    }

    #[test]
    fn discharge_stamps_completed_at_once() {
        let first = plan_status_change(
            BookingStatus::InTreatment,
            BookingStatus::Discharged,
            Some(t0()),
            None,
            t0() + Duration::days(10),
        );
        assert_eq!(first.completed_at, Some(t0() + Duration::days(10)));
        assert_eq!(first.confirmed_at, Some(t0()));
        assert!(!first.notify_confirmed);

        let again = plan_status_change(
            BookingStatus::Discharged,
            BookingStatus::Discharged,
            first.confirmed_at,
            first.completed_at,
            t0() + Duration::days(20),
        );
        assert_eq!(again.completed_at, first.completed_at);
    }

    #[test]
    fn other_statuses_leave_timestamps_alone() {
        let change = plan_status_change(
            BookingStatus::Lead,
            BookingStatus::Contacted,
            None,
            None,
            t0(),
        );
        assert_eq!(change.confirmed_at, None);
        assert_eq!(change.completed_at, None);
        assert!(!change.notify_confirmed);
    }
}
