//! RSS 2.0 and XML sitemap rendering.

use std::fmt::Write as _;

use chrono::Datelike;

use crate::locale::{Locale, ALL_LOCALES};
use crate::types::Timestamp;

/// Maximum number of posts in a feed.
pub const RSS_ITEM_LIMIT: i64 = 50;

/// Headers shared by every feed response.
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
pub const FEED_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Escape the five XML special characters.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn http_date(ts: Timestamp) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// A published blog post as needed by the feed.
#[derive(Debug, Clone)]
pub struct FeedPost {
    pub slug: String,
    pub title_en: String,
    pub title_ar: String,
    pub seo_desc_en: Option<String>,
    pub seo_desc_ar: Option<String>,
    pub excerpt_en: Option<String>,
    pub excerpt_ar: Option<String>,
    pub created_at: Timestamp,
}

fn first_present<'a>(candidates: &[Option<&'a str>], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or(fallback)
}

impl FeedPost {
    fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.title_en,
            Locale::Ar => first_present(&[Some(self.title_ar.as_str())], &self.title_en),
        }
    }

    fn description(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => first_present(
                &[self.seo_desc_en.as_deref(), self.excerpt_en.as_deref()],
                "Medical tourism blog post from Shifa AlHind",
            ),
            Locale::Ar => first_present(
                &[
                    self.seo_desc_ar.as_deref(),
                    self.excerpt_ar.as_deref(),
                    self.seo_desc_en.as_deref(),
                    self.excerpt_en.as_deref(),
                ],
                "مقالة سياحة علاجية من شفاء الهند",
            ),
        }
    }

    fn preview(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => first_present(
                &[self.excerpt_en.as_deref(), self.seo_desc_en.as_deref()],
                "Read our latest insights on medical tourism",
            ),
            Locale::Ar => first_present(
                &[
                    self.excerpt_ar.as_deref(),
                    self.seo_desc_ar.as_deref(),
                    self.excerpt_en.as_deref(),
                ],
                "اقرأ أحدث رؤى السياحة العلاجية",
            ),
        }
    }
}

struct ChannelText {
    title: &'static str,
    description: &'static str,
    image_title: &'static str,
    copyright_prefix: &'static str,
    copyright_holder: &'static str,
    editorial_team: &'static str,
    web_team: &'static str,
    categories: [&'static str; 3],
    item_category: &'static str,
    read_more: &'static str,
    feed_path: &'static str,
}

fn channel_text(locale: Locale) -> ChannelText {
    match locale {
        Locale::En => ChannelText {
            title: "Shifa AlHind Medical Tourism Blog",
            description: "Expert insights on medical tourism from GCC to India. Comprehensive \
guides on treatments, costs, hospitals, and patient success stories.",
            image_title: "Shifa AlHind Medical Tourism",
            copyright_prefix: "Copyright",
            copyright_holder: "Shifa AlHind Medical Tourism",
            editorial_team: "Shifa AlHind Editorial Team",
            web_team: "Shifa AlHind Web Team",
            categories: ["Medical Tourism", "Healthcare", "Medical Treatment"],
            item_category: "Medical Tourism",
            read_more: "Read more",
            feed_path: "/rss.xml",
        },
        Locale::Ar => ChannelText {
            title: "مدونة شفاء الهند للسياحة العلاجية",
            description: "رؤى خبراء حول السياحة العلاجية من دول الخليج إلى الهند. أدلة شاملة حول \
العلاجات والتكاليف والمستشفيات وقصص نجاح المرضى.",
            image_title: "شفاء الهند للسياحة العلاجية",
            copyright_prefix: "حقوق النشر",
            copyright_holder: "شفاء الهند للسياحة العلاجية",
            editorial_team: "فريق التحرير - شفاء الهند",
            web_team: "فريق الويب - شفاء الهند",
            categories: ["السياحة العلاجية", "الرعاية الصحية", "العلاج الطبي"],
            item_category: "السياحة العلاجية",
            read_more: "اقرأ المزيد",
            feed_path: "/rss-ar.xml",
        },
    }
}

/// Path the feed for `locale` is served at.
pub fn rss_path(locale: Locale) -> &'static str {
    channel_text(locale).feed_path
}

/// Render an RSS 2.0 channel of blog posts for one locale.
pub fn render_rss(site_url: &str, locale: Locale, posts: &[FeedPost], now: Timestamp) -> String {
    let text = channel_text(locale);
    let site = site_url.trim_end_matches('/');
    let lang = locale.as_str();

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
    xml.push_str(
        "<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\n",
    );
    xml.push_str("  <channel>\n");
    let _ = writeln!(xml, "    <title>{}</title>", text.title);
    let _ = writeln!(xml, "    <link>{site}/{lang}/blog</link>");
    let _ = writeln!(xml, "    <description>{}</description>", text.description);
    let _ = writeln!(xml, "    <language>{lang}</language>");
    let _ = writeln!(xml, "    <lastBuildDate>{}</lastBuildDate>", http_date(now));
    let _ = writeln!(
        xml,
        "    <atom:link href=\"{site}{}\" rel=\"self\" type=\"application/rss+xml\" />",
        text.feed_path
    );
    let _ = writeln!(
        xml,
        "    <image>\n      <url>{site}/logo.png</url>\n      <title>{}</title>\n      <link>{site}</link>\n    </image>",
        text.image_title
    );
    let _ = writeln!(
        xml,
        "    <copyright>{} {} {}</copyright>",
        text.copyright_prefix,
        now.year(),
        text.copyright_holder
    );
    let _ = writeln!(
        xml,
        "    <managingEditor>contact@shifaalhind.com ({})</managingEditor>",
        text.editorial_team
    );
    let _ = writeln!(
        xml,
        "    <webMaster>contact@shifaalhind.com ({})</webMaster>",
        text.web_team
    );
    for category in text.categories {
        let _ = writeln!(xml, "    <category>{category}</category>");
    }
    xml.push_str("    <ttl>1440</ttl>\n");

    for post in posts {
        let link = format!("{site}/{lang}/blog/{}", post.slug);
        let _ = writeln!(
            xml,
            "    <item>\n      <title>{title}</title>\n      <link>{link}</link>\n      \
<guid isPermaLink=\"true\">{link}</guid>\n      <description>{description}</description>\n      \
<content:encoded><![CDATA[{preview}... <a href=\"{link}\">{read_more}</a>]]></content:encoded>\n      \
<pubDate>{date}</pubDate>\n      <dc:creator>{creator}</dc:creator>\n      \
<category>{category}</category>\n    </item>",
            title = escape_xml(post.title(locale)),
            description = escape_xml(post.description(locale)),
            preview = escape_xml(post.preview(locale)),
            read_more = text.read_more,
            date = http_date(post.created_at),
            creator = text.editorial_team,
            category = text.item_category,
        );
    }

    xml.push_str("  </channel>\n</rss>\n");
    xml
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: Timestamp,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    /// `(en, ar)` alternate URLs.
    pub alternates: Option<(String, String)>,
}

/// One entry per locale for a site-relative `path` (`""` for the home page),
/// each carrying both hreflang alternates.
pub fn localized_entries(
    site_url: &str,
    path: &str,
    last_modified: Timestamp,
    change_frequency: ChangeFrequency,
    priority: f32,
) -> Vec<SitemapEntry> {
    let site = site_url.trim_end_matches('/');
    let alternates = (format!("{site}/en{path}"), format!("{site}/ar{path}"));
    ALL_LOCALES
        .iter()
        .map(|locale| SitemapEntry {
            url: format!("{site}/{locale}{path}"),
            last_modified,
            change_frequency,
            priority,
            alternates: Some(alternates.clone()),
        })
        .collect()
}

const STATIC_PAGES: [(&str, f32, ChangeFrequency); 17] = [
    ("", 1.0, ChangeFrequency::Daily),
    ("/about", 0.8, ChangeFrequency::Monthly),
    ("/treatments", 0.9, ChangeFrequency::Weekly),
    ("/doctors", 0.9, ChangeFrequency::Weekly),
    ("/hospitals", 0.9, ChangeFrequency::Weekly),
    ("/packages", 0.8, ChangeFrequency::Weekly),
    ("/services", 0.8, ChangeFrequency::Monthly),
    ("/blog", 0.8, ChangeFrequency::Daily),
    ("/stories", 0.7, ChangeFrequency::Weekly),
    ("/faq", 0.7, ChangeFrequency::Monthly),
    ("/contact", 0.9, ChangeFrequency::Monthly),
    ("/consultation", 0.9, ChangeFrequency::Weekly),
    ("/booking", 0.9, ChangeFrequency::Weekly),
    ("/medical-tourism", 0.9, ChangeFrequency::Monthly),
    ("/terms-and-conditions", 0.3, ChangeFrequency::Yearly),
    ("/privacy-policy", 0.3, ChangeFrequency::Yearly),
    ("/refund-policy", 0.3, ChangeFrequency::Yearly),
];

const SERVICE_PAGES: [&str; 5] = [
    "visa-assistance",
    "airport-pickup",
    "accommodation",
    "medical-translation",
    "post-treatment-care",
];

/// Fixed marketing pages and service pages for both locales.
pub fn static_entries(site_url: &str, now: Timestamp) -> Vec<SitemapEntry> {
    let pages = STATIC_PAGES
        .iter()
        .flat_map(|(path, priority, freq)| localized_entries(site_url, path, now, *freq, *priority));
    let services = SERVICE_PAGES.iter().flat_map(|service| {
        localized_entries(
            site_url,
            &format!("/services/{service}"),
            now,
            ChangeFrequency::Monthly,
            0.7,
        )
    });
    pages.chain(services).collect()
}

/// Render a `<urlset>` with `xhtml:link` hreflang alternates.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.url));
        let _ = writeln!(
            xml,
            "    <lastmod>{}</lastmod>",
            entry.last_modified.format("%Y-%m-%dT%H:%M:%SZ")
        );
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.change_frequency.as_str());
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        if let Some((en, ar)) = &entry.alternates {
            let _ = writeln!(
                xml,
                "    <xhtml:link rel=\"alternate\" hreflang=\"en\" href=\"{}\" />",
                escape_xml(en)
            );
            let _ = writeln!(
                xml,
                "    <xhtml:link rel=\"alternate\" hreflang=\"ar\" href=\"{}\" />",
                escape_xml(ar)
            );
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, 14, 8, 30, 0).unwrap()
    }

    fn post() -> FeedPost {
        FeedPost {
            slug: "ivf-costs".into(),
            title_en: "IVF Costs <2026> & More".into(),
            title_ar: String::new(),
            seo_desc_en: None,
            seo_desc_ar: None,
            excerpt_en: Some("Compare prices".into()),
            excerpt_ar: None,
            created_at: now(),
        }
    }

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(escape_xml(r#"a & b < c > "d" 'e'"#), "a &amp; b &lt; c &gt; &quot;d&quot; &apos;e&apos;");
    }

    #[test]
    fn english_feed_escapes_titles_and_links_posts() {
        let xml = render_rss("https://shifaalhind.com", Locale::En, &[post()], now());
        assert!(xml.contains("<title>IVF Costs &lt;2026&gt; &amp; More</title>"));
        assert!(xml.contains("<link>https://shifaalhind.com/en/blog/ivf-costs</link>"));
        assert!(xml.contains("<description>Compare prices</description>"));
        assert!(xml.contains("<pubDate>Wed, 14 Oct 2026 08:30:00 GMT</pubDate>"));
        assert!(xml.contains("href=\"https://shifaalhind.com/rss.xml\""));
        assert!(xml.contains("<copyright>Copyright 2026 Shifa AlHind Medical Tourism</copyright>"));
    }

    #[test]
    fn arabic_feed_falls_back_to_english_text() {
        let xml = render_rss("https://shifaalhind.com", Locale::Ar, &[post()], now());
        assert!(xml.contains("<language>ar</language>"));
        assert!(xml.contains("<title>IVF Costs &lt;2026&gt; &amp; More</title>"));
        assert!(xml.contains("<description>Compare prices</description>"));
        assert!(xml.contains("https://shifaalhind.com/ar/blog/ivf-costs"));
        assert!(xml.contains("rss-ar.xml"));
    }

    #[test]
    fn empty_feed_is_still_a_valid_channel() {
        let xml = render_rss("https://shifaalhind.com", Locale::En, &[], now());
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("</rss>\n"));
    }

    #[test]
    fn sitemap_entries_carry_hreflang_alternates() {
        let entries = localized_entries(
            "https://shifaalhind.com/",
            "/treatments/ivf",
            now(),
            ChangeFrequency::Weekly,
            0.9,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].url, "https://shifaalhind.com/ar/treatments/ivf");

        let xml = render_sitemap(&entries);
        assert!(xml.contains("<loc>https://shifaalhind.com/en/treatments/ivf</loc>"));
        assert!(xml.contains("hreflang=\"ar\" href=\"https://shifaalhind.com/ar/treatments/ivf\""));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.contains("<lastmod>2026-10-14T08:30:00Z</lastmod>"));
    }

    #[test]
    fn static_entries_cover_both_locales() {
        let entries = static_entries("https://shifaalhind.com", now());
        assert_eq!(entries.len(), (17 + 5) * 2);
        assert_eq!(entries[0].url, "https://shifaalhind.com/en");
        assert_eq!(entries[0].priority, 1.0);
    }
}
