//! Shared query parameter types for API handlers.

use serde::Deserialize;
use shifa_core::locale::Locale;
use shifa_core::pagination::{clamp_limit, clamp_offset};

/// `?locale=en|ar`; anything else reads as English.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

impl LocaleParams {
    pub fn locale(&self) -> Locale {
        Locale::parse_or_default(self.locale.as_deref())
    }
}

/// Query shared by the catalog list endpoints.
///
/// `published` only has an effect for authenticated callers; anonymous
/// callers always see published rows. Rows carry both languages, so a
/// `locale` query is accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogListParams {
    pub published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CatalogListParams {
    pub fn pagination(&self) -> (i64, i64) {
        (clamp_limit(self.limit), clamp_offset(self.offset))
    }
}
