//! Treatment catalog entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

/// A row from the `treatments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Treatment {
    pub id: DbId,
    pub slug: String,
    pub title_en: String,
    pub title_ar: String,
    pub summary_en: Option<String>,
    pub summary_ar: Option<String>,
    pub content_blocks_en: Option<serde_json::Value>,
    pub content_blocks_ar: Option<serde_json::Value>,
    pub cost_min: Option<f64>,
    pub cost_max: Option<f64>,
    pub currency: String,
    pub faq: Option<serde_json::Value>,
    pub hospital_ids: Vec<DbId>,
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
pub struct CreateTreatment {
    /// Derived from `title_en` when blank.
    #[serde(default)]
    pub slug: String,
    pub title_en: String,
    pub title_ar: String,
    pub summary_en: Option<String>,
    pub summary_ar: Option<String>,
    pub content_blocks_en: Option<serde_json::Value>,
    pub content_blocks_ar: Option<serde_json::Value>,
    pub cost_min: Option<f64>,
    pub cost_max: Option<f64>,
    /// Defaults to `USD`.
    pub currency: Option<String>,
    pub faq: Option<serde_json::Value>,
    #[serde(default)]
    pub hospital_ids: Vec<DbId>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTreatment {
    pub slug: Option<String>,
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub summary_en: Option<String>,
    pub summary_ar: Option<String>,
    pub content_blocks_en: Option<serde_json::Value>,
    pub content_blocks_ar: Option<serde_json::Value>,
    pub cost_min: Option<f64>,
    pub cost_max: Option<f64>,
    pub currency: Option<String>,
    pub faq: Option<serde_json::Value>,
    pub hospital_ids: Option<Vec<DbId>>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct TreatmentFilter {
    /// `None` lists both published and draft rows.
    pub published: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}
