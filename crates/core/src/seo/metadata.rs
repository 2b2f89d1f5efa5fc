//! Per-page `<head>` metadata: title, canonical URL, hreflang alternates,
//! Open Graph and Twitter cards.

use serde::Serialize;

use super::keywords::base_keywords;
use super::{absolute_url, DEFAULT_OG_IMAGE, SITE_NAME, TWITTER_HANDLE};
use crate::locale::Locale;

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

#[derive(Debug, Clone, Default)]
pub struct PageMetadataInput {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Site-relative path such as `/en/treatments/ivf`.
    pub canonical: Option<String>,
    pub og_image: Option<String>,
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub alternates: Alternates,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub robots: Robots,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternates {
    pub en: String,
    pub ar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locale: &'static str,
    pub url: String,
    pub title: String,
    pub description: String,
    pub site_name: &'static str,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

/// Build metadata for one page. Base keywords for the locale come first,
/// followed by the page's own.
pub fn page_metadata(site_url: &str, input: PageMetadataInput) -> PageMetadata {
    let site_url = site_url.trim_end_matches('/');
    let full_title = format!("{} | {SITE_NAME}", input.title);
    let canonical = match input.canonical.as_deref() {
        Some(path) if !path.is_empty() => format!("{site_url}{path}"),
        _ => site_url.to_string(),
    };
    let image = absolute_url(
        site_url,
        input.og_image.as_deref().unwrap_or(DEFAULT_OG_IMAGE),
    );

    let keywords = base_keywords(input.locale)
        .iter()
        .map(|k| k.to_string())
        .chain(input.keywords)
        .collect();

    PageMetadata {
        title: full_title.clone(),
        description: input.description.clone(),
        keywords,
        canonical: canonical.clone(),
        alternates: Alternates {
            en: format!("{site_url}/en"),
            ar: format!("{site_url}/ar"),
        },
        open_graph: OpenGraph {
            kind: "website",
            locale: input.locale.og_locale(),
            url: canonical,
            title: full_title.clone(),
            description: input.description.clone(),
            site_name: SITE_NAME,
            images: vec![OgImage {
                url: image.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: input.title,
            }],
        },
        twitter: TwitterCard {
            card: "summary_large_image",
            title: full_title,
            description: input.description,
            images: vec![image],
            creator: TWITTER_HANDLE,
        },
        robots: Robots {
            index: true,
            follow: true,
        },
    }
}
