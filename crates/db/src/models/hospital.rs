//! Partner hospital entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

/// A row from the `hospitals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hospital {
    pub id: DbId,
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub country: String,
    pub accreditations: Vec<String>,
    pub languages_supported: Vec<String>,
    pub images: Option<serde_json::Value>,
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
pub struct CreateHospital {
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub address: Option<String>,
    pub city: String,
    /// Defaults to `India`.
    pub country: Option<String>,
    #[serde(default)]
    pub accreditations: Vec<String>,
    #[serde(default)]
    pub languages_supported: Vec<String>,
    pub images: Option<serde_json::Value>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHospital {
    pub slug: Option<String>,
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub accreditations: Option<Vec<String>>,
    pub languages_supported: Option<Vec<String>>,
    pub images: Option<serde_json::Value>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct HospitalFilter {
    pub published: Option<bool>,
    pub city: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
