//! Patient bookings, created as leads by the public consultation form.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

/// A row from the `bookings` table.
///
/// `status` holds one of the `BookingStatus` values; the column's `CHECK`
/// constraint enforces the same set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub patient_name: String,
    pub email: String,
    pub phone: String,
    pub country_of_origin: String,
    pub locale: String,
    pub treatment_id: Option<DbId>,
    pub hospital_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub package_id: Option<DbId>,
    pub preferred_dates: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub status: String,
    pub confirmed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A booking with the display names of the entities it references.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithRefs {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub treatment_title_en: Option<String>,
    pub hospital_name_en: Option<String>,
    pub doctor_name_en: Option<String>,
    pub package_name_en: Option<String>,
}

/// Insert payload built from a validated lead.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub patient_name: String,
    pub email: String,
    pub phone: String,
    pub country_of_origin: String,
    pub locale: String,
    pub treatment_id: Option<DbId>,
    pub hospital_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub package_id: Option<DbId>,
    pub preferred_dates: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// Admin PATCH body. `status` is parsed into `BookingStatus` by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBooking {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
    pub treatment_id: Option<DbId>,
    pub hospital_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub package_id: Option<DbId>,
    pub preferred_dates: Option<serde_json::Value>,
}

/// Fully resolved column values written by `BookingRepo::update`.
#[derive(Debug, Clone)]
pub struct BookingChanges {
    pub status: Option<String>,
    pub confirmed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub admin_notes: Option<String>,
    pub treatment_id: Option<DbId>,
    pub hospital_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub package_id: Option<DbId>,
    pub preferred_dates: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<String>,
    pub country: Option<String>,
    pub treatment_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}
