//! URL slug generation and validation for catalog entities.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid regex"));
static VALID_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

/// Lowercase, drop punctuation, collapse separators into single dashes.
pub fn generate_slug(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let stripped = NON_SLUG_RE.replace_all(&lower, "");
    SEPARATOR_RE
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_string()
}

/// Use `slug` as given, or derive one from `title` when it is blank.
pub fn resolve_slug(slug: &str, title: &str) -> Result<String, CoreError> {
    let slug = if slug.trim().is_empty() {
        generate_slug(title)
    } else {
        slug.to_string()
    };
    validate_slug(&slug)?;
    Ok(slug)
}

/// Slugs are lowercase ASCII words joined by single dashes.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if VALID_SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single dashes"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn generated_slugs_strip_punctuation() {
        assert_eq!(
            generate_slug("  Knee Replacement: Cost & Recovery! "),
            "knee-replacement-cost-recovery"
        );
        assert_eq!(generate_slug("IVF__in--Bangalore"), "ivf-in-bangalore");
    }

    #[test]
    fn generated_slugs_validate() {
        let slug = generate_slug("Hip Replacement in Bangalore");
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn blank_slug_is_derived_from_title() {
        assert_eq!(resolve_slug("", "Knee Replacement").unwrap(), "knee-replacement");
        assert_eq!(resolve_slug("  ", "IVF in Bangalore").unwrap(), "ivf-in-bangalore");
        assert_eq!(resolve_slug("tkr", "Knee Replacement").unwrap(), "tkr");
    }

    #[test]
    fn given_or_derived_slugs_still_validate() {
        assert_matches!(resolve_slug("Knee Replacement", "Knee"), Err(CoreError::Validation(_)));
        assert_matches!(resolve_slug("", "!!!"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_malformed_slugs() {
        for bad in ["", "Hip", "hip--replacement", "-hip", "hip-", "hip replacement"] {
            assert_matches!(validate_slug(bad), Err(CoreError::Validation(_)), "{bad}");
        }
    }
}
