//! RSS feeds and the XML sitemap.
//!
//! Database failures never fail the response: the RSS feed renders empty and
//! a failing sitemap section is left out, each with an error log.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shifa_core::feeds::{
    localized_entries, render_rss, render_sitemap, static_entries, ChangeFrequency, FeedPost,
    SitemapEntry, FEED_CACHE_CONTROL, RSS_ITEM_LIMIT, XML_CONTENT_TYPE,
};
use shifa_core::locale::Locale;
use shifa_db::models::content_page::BlogFeedRow;
use shifa_db::repositories::{
    ContentPageRepo, DoctorRepo, HospitalRepo, PackageRepo, SlugStamp, TreatmentRepo,
};

use crate::state::AppState;

fn xml(body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, XML_CONTENT_TYPE),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        body,
    )
        .into_response()
}

fn feed_post(row: BlogFeedRow) -> FeedPost {
    FeedPost {
        slug: row.slug,
        title_en: row.title_en,
        title_ar: row.title_ar,
        seo_desc_en: row.seo_desc_en,
        seo_desc_ar: row.seo_desc_ar,
        excerpt_en: row.excerpt_en,
        excerpt_ar: row.excerpt_ar,
        created_at: row.created_at,
    }
}

async fn rss(state: &AppState, locale: Locale) -> Response {
    let posts: Vec<FeedPost> =
        match ContentPageRepo::published_blog_feed(&state.pool, RSS_ITEM_LIMIT).await {
            Ok(rows) => rows.into_iter().map(feed_post).collect(),
            Err(e) => {
                tracing::error!(error = %e, locale = %locale, "RSS feed query failed");
                Vec::new()
            }
        };
    xml(render_rss(&state.config.site_url, locale, &posts, Utc::now()))
}

/// GET /rss.xml
pub async fn rss_en(State(state): State<AppState>) -> Response {
    rss(&state, Locale::En).await
}

/// GET /rss-ar.xml
pub async fn rss_ar(State(state): State<AppState>) -> Response {
    rss(&state, Locale::Ar).await
}

fn section_entries(
    site: &str,
    section: &str,
    rows: Result<Vec<SlugStamp>, sqlx::Error>,
    change_frequency: ChangeFrequency,
    priority: f32,
) -> Vec<SitemapEntry> {
    match rows {
        Ok(rows) => rows
            .iter()
            .flat_map(|row| {
                localized_entries(
                    site,
                    &format!("/{section}/{}", row.slug),
                    row.updated_at,
                    change_frequency,
                    priority,
                )
            })
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, section, "Sitemap section query failed");
            Vec::new()
        }
    }
}

/// GET /sitemap.xml
///
/// Static pages, published catalog entities and blog posts in both locales,
/// plus every generated landing page of the content store.
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let site = state.config.site_url.as_str();
    let now = Utc::now();
    let pool = &state.pool;

    let mut entries = static_entries(site, now);
    entries.extend(section_entries(
        site,
        "treatments",
        TreatmentRepo::published_slugs(pool).await,
        ChangeFrequency::Weekly,
        0.9,
    ));
    entries.extend(section_entries(
        site,
        "doctors",
        DoctorRepo::published_slugs(pool).await,
        ChangeFrequency::Monthly,
        0.7,
    ));
    entries.extend(section_entries(
        site,
        "hospitals",
        HospitalRepo::published_slugs(pool).await,
        ChangeFrequency::Monthly,
        0.8,
    ));
    entries.extend(section_entries(
        site,
        "packages",
        PackageRepo::published_slugs(pool).await,
        ChangeFrequency::Monthly,
        0.7,
    ));
    entries.extend(section_entries(
        site,
        "blog",
        ContentPageRepo::published_blog_slugs(pool).await,
        ChangeFrequency::Monthly,
        0.7,
    ));
    entries.extend(generated_page_entries(&state, now).await);

    xml(render_sitemap(&entries))
}

async fn generated_page_entries(state: &AppState, now: chrono::DateTime<Utc>) -> Vec<SitemapEntry> {
    let store = &state.content_store;
    let mut entries = Vec::new();

    let sections = [
        ("cities", store.all_cities().await, ChangeFrequency::Weekly, 0.9),
        ("treatment landings", store.all_treatments().await, ChangeFrequency::Weekly, 0.8),
        ("articles", store.all_articles().await, ChangeFrequency::Monthly, 0.7),
    ];
    for (section, records, change_frequency, priority) in sections {
        match records {
            Ok(records) => entries.extend(records.iter().map(|record| SitemapEntry {
                url: record.url.clone(),
                last_modified: now,
                change_frequency,
                priority,
                alternates: None,
            })),
            Err(e) => tracing::error!(error = %e, section, "Sitemap content section unavailable"),
        }
    }
    entries
}
