//! Doctor profile entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

/// A row from the `doctors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Doctor {
    pub id: DbId,
    pub hospital_id: Option<DbId>,
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub bio_en: Option<String>,
    pub bio_ar: Option<String>,
    pub qualifications: Vec<String>,
    pub specialties: Vec<String>,
    pub languages: Vec<String>,
    pub profile_image: Option<String>,
    pub consultation_fee: Option<f64>,
    pub currency: String,
    pub telemedicine_available: bool,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub published: bool,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctor {
    pub hospital_id: Option<DbId>,
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub bio_en: Option<String>,
    pub bio_ar: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub profile_image: Option<String>,
    pub consultation_fee: Option<f64>,
    pub currency: Option<String>,
    /// Defaults to `true`.
    pub telemedicine_available: Option<bool>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDoctor {
    pub hospital_id: Option<DbId>,
    pub slug: Option<String>,
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub bio_en: Option<String>,
    pub bio_ar: Option<String>,
    pub qualifications: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub profile_image: Option<String>,
    pub consultation_fee: Option<f64>,
    pub currency: Option<String>,
    pub telemedicine_available: Option<bool>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    pub published: Option<bool>,
    pub hospital_id: Option<DbId>,
    /// Matches when the doctor's `specialties` array contains this value.
    pub specialty: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
