//! Supported site locales.

use serde::{Deserialize, Serialize};

/// The two locales the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

pub const ALL_LOCALES: [Locale; 2] = [Locale::En, Locale::Ar];

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Parse a locale code, falling back to English for anything unknown.
    pub fn parse_or_default(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("ar") => Locale::Ar,
            _ => Locale::En,
        }
    }

    /// Open Graph locale tag.
    pub fn og_locale(self) -> &'static str {
        match self {
            Locale::En => "en_US",
            Locale::Ar => "ar_SA",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Locale::parse_or_default(Some("fr")), Locale::En);
        assert_eq!(Locale::parse_or_default(None), Locale::En);
        assert_eq!(Locale::parse_or_default(Some("ar")), Locale::Ar);
    }

    #[test]
    fn arabic_open_graph_locale() {
        assert_eq!(Locale::Ar.og_locale(), "ar_SA");
    }
}
