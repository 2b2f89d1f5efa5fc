//! Read-only store of pre-generated SEO landing pages.
//!
//! Three JSON arrays (articles, treatment landings, city landings) are read
//! from the data directory the first time each is needed and then kept for
//! the life of the process. A failed read is returned to the caller and
//! attempted again on the next access. Every lookup is a linear scan keyed by
//! the record's absolute URL.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

pub const ARTICLES_FILE: &str = "content_articles_full.json";
pub const TREATMENTS_FILE: &str = "content_treatments_full.json";
pub const CITIES_FILE: &str = "content_cities_full.json";

/// Default number of related articles returned.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Default number of search hits returned.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// One generated page as written by the content pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub url: String,
    pub locale: String,
    pub slug: String,
    pub page_type: String,
    pub title: String,
    pub meta_desc: String,
    pub h1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_ld: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_native_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_medical_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ContentRecord {
    /// `/`-separated URL segments; index 3 is the locale, 5 the country.
    fn segments(&self) -> Vec<&str> {
        self.url.split('/').collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Path parameters of an article page.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleParams {
    pub locale: String,
    pub country: String,
    pub city: String,
    pub treatment: String,
    pub slug: String,
}

/// Path parameters of a treatment landing page.
#[derive(Debug, Clone, Deserialize)]
pub struct TreatmentParams {
    pub locale: String,
    pub country: String,
    pub city: String,
    pub treatment: String,
}

/// Path parameters of a city landing page.
#[derive(Debug, Clone, Deserialize)]
pub struct CityParams {
    pub locale: String,
    pub country: String,
    pub city: String,
}

pub type StoreResult<T> = Result<T, ContentStoreError>;

#[derive(Debug)]
pub struct ContentStore {
    data_dir: PathBuf,
    site_url: String,
    articles: OnceCell<Vec<ContentRecord>>,
    treatments: OnceCell<Vec<ContentRecord>>,
    cities: OnceCell<Vec<ContentRecord>>,
}

impl ContentStore {
    pub fn new(data_dir: impl Into<PathBuf>, site_url: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            site_url: site_url.into().trim_end_matches('/').to_string(),
            articles: OnceCell::new(),
            treatments: OnceCell::new(),
            cities: OnceCell::new(),
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub async fn all_articles(&self) -> StoreResult<&[ContentRecord]> {
        load(&self.articles, &self.data_dir, ARTICLES_FILE).await
    }

    pub async fn all_treatments(&self) -> StoreResult<&[ContentRecord]> {
        load(&self.treatments, &self.data_dir, TREATMENTS_FILE).await
    }

    pub async fn all_cities(&self) -> StoreResult<&[ContentRecord]> {
        load(&self.cities, &self.data_dir, CITIES_FILE).await
    }

    pub async fn get_article(&self, p: &ArticleParams) -> StoreResult<Option<&ContentRecord>> {
        let url = format!(
            "{}/{}/blog/{}/{}/{}/{}",
            self.site_url, p.locale, p.country, p.city, p.treatment, p.slug
        );
        Ok(find_url(self.all_articles().await?, &url))
    }

    pub async fn get_treatment(&self, p: &TreatmentParams) -> StoreResult<Option<&ContentRecord>> {
        let url = format!(
            "{}/{}/medical-tourism/{}/{}/{}",
            self.site_url, p.locale, p.country, p.city, p.treatment
        );
        Ok(find_url(self.all_treatments().await?, &url))
    }

    pub async fn get_city(&self, p: &CityParams) -> StoreResult<Option<&ContentRecord>> {
        let url = format!(
            "{}/{}/medical-tourism/{}/{}",
            self.site_url, p.locale, p.country, p.city
        );
        Ok(find_url(self.all_cities().await?, &url))
    }

    pub async fn articles_by_treatment(
        &self,
        treatment_slug: &str,
        locale: &str,
    ) -> StoreResult<Vec<&ContentRecord>> {
        Ok(containing_segment(self.all_articles().await?, treatment_slug, locale))
    }

    pub async fn articles_by_city(
        &self,
        city_slug: &str,
        locale: &str,
    ) -> StoreResult<Vec<&ContentRecord>> {
        Ok(containing_segment(self.all_articles().await?, city_slug, locale))
    }

    pub async fn treatments_by_city(
        &self,
        city_slug: &str,
        locale: &str,
    ) -> StoreResult<Vec<&ContentRecord>> {
        Ok(containing_segment(self.all_treatments().await?, city_slug, locale))
    }

    pub async fn cities_by_country(
        &self,
        country_slug: &str,
        locale: &str,
    ) -> StoreResult<Vec<&ContentRecord>> {
        Ok(containing_segment(self.all_cities().await?, country_slug, locale))
    }

    /// Articles that share the locale and `/{country}/{city}/{treatment}/`
    /// path of `current_url`, excluding the current page.
    pub async fn related_articles(
        &self,
        current_url: &str,
        limit: usize,
    ) -> StoreResult<Vec<&ContentRecord>> {
        let parts: Vec<&str> = current_url.split('/').collect();
        let part = |i: usize| parts.get(i).copied().unwrap_or("");
        let locale = part(3);
        let needle = format!("/{}/{}/{}/", part(5), part(6), part(7));

        Ok(self
            .all_articles()
            .await?
            .iter()
            .filter(|a| a.url.contains(&needle) && a.url != current_url && a.locale == locale)
            .take(limit)
            .collect())
    }

    /// Case-insensitive substring search across all three collections.
    pub async fn search(
        &self,
        query: &str,
        locale: &str,
        limit: usize,
    ) -> StoreResult<Vec<&ContentRecord>> {
        let needle = query.to_lowercase();
        let matches = |text: &str| text.to_lowercase().contains(&needle);

        Ok(self
            .everything()
            .await?
            .into_iter()
            .filter(|page| page.locale == locale)
            .filter(|page| {
                matches(&page.title)
                    || matches(&page.meta_desc)
                    || matches(&page.h1)
                    || page.full_content.as_deref().is_some_and(|c| matches(c))
            })
            .take(limit)
            .collect())
    }

    /// Distinct country slugs, in first-seen order.
    pub async fn all_countries(&self) -> StoreResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for page in self.everything().await? {
            let segments = page.segments();
            if segments.len() > 5 && seen.insert(segments[5]) {
                out.push(segments[5].to_string());
            }
        }
        Ok(out)
    }

    /// Distinct treatment slugs from treatment landings and articles.
    pub async fn all_treatment_types(&self) -> StoreResult<Vec<String>> {
        let articles = self.all_articles().await?;
        let treatments = self.all_treatments().await?;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for page in articles.iter().chain(treatments.iter()) {
            let segments = page.segments();
            let eligible = match page.page_type.as_str() {
                "treatment_landing" => segments.len() > 7,
                "article" => segments.len() > 8,
                _ => false,
            };
            if eligible && seen.insert(segments[7]) {
                out.push(segments[7].to_string());
            }
        }
        Ok(out)
    }

    async fn everything(&self) -> StoreResult<Vec<&ContentRecord>> {
        let articles = self.all_articles().await?;
        let treatments = self.all_treatments().await?;
        let cities = self.all_cities().await?;
        Ok(articles.iter().chain(treatments).chain(cities).collect())
    }
}

async fn load<'a>(
    cell: &'a OnceCell<Vec<ContentRecord>>,
    dir: &Path,
    file: &str,
) -> StoreResult<&'a [ContentRecord]> {
    let records = cell
        .get_or_try_init(|| async {
            let path = dir.join(file);
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| ContentStoreError::Io {
                    path: path.clone(),
                    source,
                })?;
            let records: Vec<ContentRecord> = serde_json::from_slice(&bytes)
                .map_err(|source| ContentStoreError::Parse {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(file, count = records.len(), "Loaded content file");
            Ok(records)
        })
        .await?;
    Ok(records.as_slice())
}

fn find_url<'a>(records: &'a [ContentRecord], url: &str) -> Option<&'a ContentRecord> {
    records.iter().find(|r| r.url == url)
}

fn containing_segment<'a>(
    records: &'a [ContentRecord],
    slug: &str,
    locale: &str,
) -> Vec<&'a ContentRecord> {
    let needle = format!("/{slug}/");
    records
        .iter()
        .filter(|r| r.url.contains(&needle) && r.locale == locale)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    const SITE: &str = "https://shifaalhind.com";

    fn record(url: &str, locale: &str, page_type: &str, title: &str) -> serde_json::Value {
        json!({
            "url": url,
            "locale": locale,
            "slug": url.rsplit('/').next().unwrap(),
            "page_type": page_type,
            "title": title,
            "meta_desc": format!("{title} description"),
            "h1": title,
        })
    }

    fn write(dir: &Path, file: &str, records: serde_json::Value) {
        std::fs::write(dir.join(file), serde_json::to_vec(&records).unwrap()).unwrap();
    }

    fn seeded() -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            ARTICLES_FILE,
            json!([
                record(
                    &format!("{SITE}/en/blog/uae/chennai/knee-replacement/cost-guide"),
                    "en",
                    "article",
                    "Knee Replacement Cost Guide"
                ),
                record(
                    &format!("{SITE}/en/blog/uae/chennai/knee-replacement/recovery"),
                    "en",
                    "article",
                    "Recovery After Knee Surgery"
                ),
                record(
                    &format!("{SITE}/ar/blog/uae/chennai/knee-replacement/cost-guide"),
                    "ar",
                    "article",
                    "دليل تكلفة استبدال الركبة"
                ),
                record(
                    &format!("{SITE}/en/blog/saudi-arabia/delhi/ivf/success-rates"),
                    "en",
                    "article",
                    "IVF Success Rates"
                ),
            ]),
        );
        write(
            dir.path(),
            TREATMENTS_FILE,
            json!([record(
                &format!("{SITE}/en/medical-tourism/uae/chennai/knee-replacement"),
                "en",
                "treatment_landing",
                "Knee Replacement in Chennai"
            )]),
        );
        write(
            dir.path(),
            CITIES_FILE,
            json!([record(
                &format!("{SITE}/en/medical-tourism/oman/chennai"),
                "en",
                "city_landing",
                "Medical Tourism in Chennai"
            )]),
        );
        let store = ContentStore::new(dir.path(), SITE);
        (dir, store)
    }

    #[tokio::test]
    async fn get_article_matches_exact_url_only() {
        let (_dir, store) = seeded();
        let params = ArticleParams {
            locale: "en".into(),
            country: "uae".into(),
            city: "chennai".into(),
            treatment: "knee-replacement".into(),
            slug: "cost-guide".into(),
        };
        let found = store.get_article(&params).await.unwrap().unwrap();
        assert_eq!(found.title, "Knee Replacement Cost Guide");

        let missing = ArticleParams {
            slug: "does-not-exist".into(),
            ..params
        };
        assert_matches!(store.get_article(&missing).await, Ok(None));
    }

    #[tokio::test]
    async fn treatment_and_city_lookups() {
        let (_dir, store) = seeded();
        let treatment = store
            .get_treatment(&TreatmentParams {
                locale: "en".into(),
                country: "uae".into(),
                city: "chennai".into(),
                treatment: "knee-replacement".into(),
            })
            .await
            .unwrap();
        assert!(treatment.is_some());

        let city = store
            .get_city(&CityParams {
                locale: "ar".into(),
                country: "oman".into(),
                city: "chennai".into(),
            })
            .await
            .unwrap();
        assert!(city.is_none());
    }

    #[tokio::test]
    async fn related_articles_share_path_and_locale() {
        let (_dir, store) = seeded();
        let current = format!("{SITE}/en/blog/uae/chennai/knee-replacement/cost-guide");
        let related = store.related_articles(&current, DEFAULT_RELATED_LIMIT).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "recovery");
    }

    #[tokio::test]
    async fn filters_by_segment_and_locale() {
        let (_dir, store) = seeded();
        assert_eq!(store.articles_by_city("chennai", "en").await.unwrap().len(), 2);
        assert_eq!(store.articles_by_treatment("ivf", "en").await.unwrap().len(), 1);
        assert_eq!(store.treatments_by_city("chennai", "ar").await.unwrap().len(), 0);
        assert_eq!(store.cities_by_country("oman", "en").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_limited() {
        let (_dir, store) = seeded();
        let hits = store.search("KNEE", "en", DEFAULT_SEARCH_LIMIT).await.unwrap();
        assert_eq!(hits.len(), 3);
        let one = store.search("knee", "en", 1).await.unwrap();
        assert_eq!(one.len(), 1);
        assert!(store.search("knee", "ar", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn distinct_countries_and_treatment_types() {
        let (_dir, store) = seeded();
        assert_eq!(
            store.all_countries().await.unwrap(),
            vec!["uae", "saudi-arabia", "oman"]
        );
        assert_eq!(
            store.all_treatment_types().await.unwrap(),
            vec!["knee-replacement", "ivf"]
        );
    }

    #[tokio::test]
    async fn missing_file_errors_then_loads_once_present() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path(), SITE);
        assert_matches!(store.all_cities().await, Err(ContentStoreError::Io { .. }));

        write(dir.path(), CITIES_FILE, json!([]));
        assert!(store.all_cities().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ARTICLES_FILE), b"{not json").unwrap();
        let store = ContentStore::new(dir.path(), SITE);
        assert_matches!(store.all_articles().await, Err(ContentStoreError::Parse { .. }));
    }
}
