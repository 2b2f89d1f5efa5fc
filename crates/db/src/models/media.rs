//! Uploaded media assets.

use serde::Serialize;
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub key: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub format: Option<String>,
    pub size_bytes: i64,
    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    pub tags: Vec<String>,
    pub variants: Option<serde_json::Value>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Built by the upload handler after the file is stored.
#[derive(Debug, Clone)]
pub struct CreateMedia {
    pub key: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub format: Option<String>,
    pub size_bytes: i64,
    pub alt_en: Option<String>,
    pub alt_ar: Option<String>,
    pub tags: Vec<String>,
    pub variants: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct MediaFilter {
    pub tag: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
