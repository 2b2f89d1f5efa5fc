//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` as the first argument. Every read and update path excludes
//! archived rows.

pub mod booking_repo;
pub mod content_page_repo;
pub mod doctor_repo;
pub mod hospital_repo;
pub mod media_repo;
pub mod package_repo;
pub mod treatment_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use content_page_repo::ContentPageRepo;
pub use doctor_repo::DoctorRepo;
pub use hospital_repo::HospitalRepo;
pub use media_repo::MediaRepo;
pub use package_repo::PackageRepo;
pub use treatment_repo::TreatmentRepo;
pub use user_repo::UserRepo;

use shifa_core::types::Timestamp;
use sqlx::FromRow;

/// `(slug, updated_at)` pair used to build sitemap entries.
#[derive(Debug, Clone, FromRow)]
pub struct SlugStamp {
    pub slug: String,
    pub updated_at: Timestamp,
}
