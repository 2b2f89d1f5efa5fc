//! HTTP handlers, one module per resource.

pub mod auth;
pub mod bookings;
pub mod content;
pub mod currency;
pub mod doctors;
pub mod feeds;
pub mod hospitals;
pub mod lead;
pub mod media;
pub mod packages;
pub mod pages;
pub mod seo;
pub mod treatments;

use shifa_core::error::CoreError;

use crate::error::AppError;
use crate::middleware::auth::OptionalAuthUser;

/// Reject blank values for required bilingual text fields.
pub(crate) fn require_text(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Required fields are empty: {}",
            missing.join(", ")
        ))))
    }
}

/// Published filter for a catalog list: staff choose, everyone else sees
/// published rows only.
pub(crate) fn visible_filter(viewer: &OptionalAuthUser, requested: Option<bool>) -> Option<bool> {
    if viewer.is_authenticated() {
        requested
    } else {
        Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::AuthUser;

    #[test]
    fn blank_required_fields_are_named() {
        let err = require_text(&[("title_en", "IVF"), ("title_ar", "  ")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Required fields are empty: title_ar"
        );
        assert!(require_text(&[("name_en", "Apollo")]).is_ok());
    }

    #[test]
    fn anonymous_viewers_only_see_published() {
        let anonymous = OptionalAuthUser(None);
        assert_eq!(visible_filter(&anonymous, Some(false)), Some(true));
        assert_eq!(visible_filter(&anonymous, None), Some(true));

        let editor = OptionalAuthUser(Some(AuthUser {
            user_id: 3,
            role: "EDITOR".into(),
        }));
        assert_eq!(visible_filter(&editor, Some(false)), Some(false));
        assert_eq!(visible_filter(&editor, None), None);
    }
}
