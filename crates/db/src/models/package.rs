//! Treatment package entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

/// A row from the `packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Package {
    pub id: DbId,
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub features: Option<serde_json::Value>,
    pub published: bool,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackage {
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub features: Option<serde_json::Value>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackage {
    pub slug: Option<String>,
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub features: Option<serde_json::Value>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    pub published: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}
