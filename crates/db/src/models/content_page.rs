//! Editorial content pages (blog posts, static pages, FAQs).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use shifa_core::types::{DbId, Timestamp};

pub const CONTENT_TYPE_BLOG: &str = "blog";
pub const CONTENT_TYPE_PAGE: &str = "page";
pub const CONTENT_TYPE_FAQ: &str = "faq";

/// Accepted values of the `type` column.
pub const CONTENT_TYPES: [&str; 3] = [CONTENT_TYPE_BLOG, CONTENT_TYPE_PAGE, CONTENT_TYPE_FAQ];

/// A row from the `content_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentPage {
    pub id: DbId,
    pub slug: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub page_type: String,
    pub title_en: String,
    pub title_ar: String,
    pub excerpt_en: Option<String>,
    pub excerpt_ar: Option<String>,
    pub blocks_en: Option<serde_json::Value>,
    pub blocks_ar: Option<serde_json::Value>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub published: bool,
    pub published_at: Option<Timestamp>,
    pub scheduled_for: Option<Timestamp>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentPage {
    /// Derived from `title_en` when blank.
    #[serde(default)]
    pub slug: String,
    /// Defaults to `page`.
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    pub title_en: String,
    pub title_ar: String,
    pub excerpt_en: Option<String>,
    pub excerpt_ar: Option<String>,
    pub blocks_en: Option<serde_json::Value>,
    pub blocks_ar: Option<serde_json::Value>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub scheduled_for: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentPage {
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub excerpt_en: Option<String>,
    pub excerpt_ar: Option<String>,
    pub blocks_en: Option<serde_json::Value>,
    pub blocks_ar: Option<serde_json::Value>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub seo_title_en: Option<String>,
    pub seo_title_ar: Option<String>,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub published: Option<bool>,
    pub scheduled_for: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub struct ContentPageFilter {
    pub page_type: String,
    pub published: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

/// Projection used by the RSS feed.
#[derive(Debug, Clone, FromRow)]
pub struct BlogFeedRow {
    pub slug: String,
    pub title_en: String,
    pub title_ar: String,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub excerpt_en: Option<String>,
    pub excerpt_ar: Option<String>,
    pub created_at: Timestamp,
}
