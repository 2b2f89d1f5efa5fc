//! SEO metadata, keyword sets and schema.org JSON-LD generators.

pub mod keywords;
pub mod metadata;
pub mod schema;

pub const SITE_NAME: &str = "Shifa AlHind";
pub const SITE_NAME_AR: &str = "شفاء الهند";

/// Site URL used when none is configured.
pub const DEFAULT_SITE_URL: &str = "https://shifaalhind.com";

pub const SITE_DESCRIPTION: &str = "Trusted Medical Tourism Partner connecting GCC patients with \
world-class healthcare in India. JCI-accredited hospitals, Arabic support, 60-80% cost savings.";

pub const SITE_DESCRIPTION_AR: &str = "شريك السياحة العلاجية الموثوق الذي يربط مرضى دول مجلس التعاون \
الخليجي بالرعاية الصحية العالمية في الهند. مستشفيات معتمدة من JCI، دعم عربي، توفير 60-80٪ في التكاليف.";

pub const DEFAULT_OG_IMAGE: &str = "/og-image.jpg";
pub const TWITTER_HANDLE: &str = "@shifaalhind";
pub const CONTACT_PHONE: &str = "+91 801 234 5678";
pub const CONTACT_EMAIL: &str = "info@shifaalhind.com";

pub const SOCIAL_LINKS: [&str; 4] = [
    "https://twitter.com/shifaalhind",
    "https://facebook.com/shifaalhind",
    "https://instagram.com/shifaalhind",
    "https://linkedin.com/company/shifaalhind",
];

const WORDS_PER_MINUTE: usize = 200;

/// Minutes to read at 200 words per minute, rounded up.
pub fn reading_time_minutes(content: &str) -> usize {
    content.split_whitespace().count().div_ceil(WORDS_PER_MINUTE)
}

/// Prefix root-relative paths with the site URL.
pub fn absolute_url(site_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.is_empty() {
        site_url.to_string()
    } else {
        format!("{}/{}", site_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
