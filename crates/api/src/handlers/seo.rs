//! Page metadata and JSON-LD for published catalog entities.
//!
//! The frontend renders `metadata` into `<head>` and each `json_ld` document
//! into its own `<script type="application/ld+json">`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use shifa_core::locale::Locale;
use shifa_core::seo::metadata::{page_metadata, PageMetadata, PageMetadataInput};
use shifa_core::seo::schema::{
    blog_posting, breadcrumb_list, faq_items_from_json, faq_page, hospital, medical_business,
    medical_procedure, physician, BlogPostingInput, BreadcrumbItem, CostRange, HospitalInput, MedicalProcedureInput,
    PhysicianInput,
};
use shifa_core::seo::{
    absolute_url, SITE_DESCRIPTION, SITE_DESCRIPTION_AR, SITE_NAME, SITE_NAME_AR,
};
use shifa_db::models::content_page::{ContentPage, CONTENT_TYPE_BLOG};
use shifa_db::models::doctor::Doctor;
use shifa_db::models::hospital::Hospital;
use shifa_db::models::treatment::Treatment;
use shifa_db::repositories::{ContentPageRepo, DoctorRepo, HospitalRepo, TreatmentRepo};

use crate::error::{AppError, AppResult};
use crate::query::LocaleParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeoDocument {
    pub metadata: PageMetadata,
    pub json_ld: Vec<Value>,
}

/// GET /api/v1/seo/{kind}/{slug}?locale=
///
/// `kind` is one of `treatments`, `hospitals`, `doctors`, `content`. Only
/// published rows are described.
pub async fn describe(
    State(state): State<AppState>,
    Path((kind, slug)): Path<(String, String)>,
    Query(params): Query<LocaleParams>,
) -> AppResult<Json<ApiResponse<SeoDocument>>> {
    let locale = params.locale();
    let site = state.config.site_url.as_str();
    let missing = || AppError::NotFound(format!("No published {kind} with slug '{slug}'"));

    let document = match kind.as_str() {
        "treatments" => {
            let t = TreatmentRepo::find_by_slug(&state.pool, &slug, true)
                .await?
                .ok_or_else(missing)?;
            treatment_document(site, locale, &t)
        }
        "hospitals" => {
            let h = HospitalRepo::find_by_slug(&state.pool, &slug, true)
                .await?
                .ok_or_else(missing)?;
            hospital_document(site, locale, &h)
        }
        "doctors" => {
            let d = DoctorRepo::find_by_slug(&state.pool, &slug, true)
                .await?
                .ok_or_else(missing)?;
            let employer = match d.hospital_id {
                Some(id) => HospitalRepo::find_by_id(&state.pool, id).await?,
                None => None,
            };
            doctor_document(site, locale, &d, employer.as_ref())
        }
        "content" => {
            let page = ContentPageRepo::find_by_slug(&state.pool, &slug, true)
                .await?
                .ok_or_else(missing)?;
            content_document(site, locale, &page)
        }
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown SEO kind '{other}'. Must be one of: treatments, hospitals, doctors, content"
            )))
        }
    };

    Ok(Json(ApiResponse::ok(document)))
}

/// GET /api/v1/seo/home?locale=
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> Json<ApiResponse<SeoDocument>> {
    Json(ApiResponse::ok(home_document(
        &state.config.site_url,
        params.locale(),
    )))
}

/// Pick the localized value, falling back to English.
fn pick<'a>(locale: Locale, en: &'a str, ar: &'a str) -> &'a str {
    match locale {
        Locale::Ar if !ar.trim().is_empty() => ar,
        _ => en,
    }
}

fn pick_opt(locale: Locale, en: Option<&str>, ar: Option<&str>) -> Option<String> {
    let value = match locale {
        Locale::Ar => ar.filter(|s| !s.trim().is_empty()).or(en),
        Locale::En => en,
    };
    value.map(str::to_string)
}

fn home_crumb(site: &str, locale: Locale) -> BreadcrumbItem {
    BreadcrumbItem {
        name: pick(locale, SITE_NAME, SITE_NAME_AR).to_string(),
        url: format!("{site}/{locale}"),
    }
}

fn crumbs(site: &str, locale: Locale, section: (&str, &str), leaf: (&str, &str)) -> Value {
    breadcrumb_list(&[
        home_crumb(site, locale),
        BreadcrumbItem {
            name: section.0.to_string(),
            url: absolute_url(site, section.1),
        },
        BreadcrumbItem {
            name: leaf.0.to_string(),
            url: absolute_url(site, leaf.1),
        },
    ])
}

pub fn home_document(site: &str, locale: Locale) -> SeoDocument {
    let description = pick(locale, SITE_DESCRIPTION, SITE_DESCRIPTION_AR);
    let title = match locale {
        Locale::En => "Medical Tourism in India for GCC Patients",
        Locale::Ar => "السياحة العلاجية في الهند لمرضى الخليج",
    };

    SeoDocument {
        metadata: page_metadata(
            site,
            PageMetadataInput {
                title: title.to_string(),
                description: description.to_string(),
                keywords: Vec::new(),
                canonical: Some(format!("/{locale}")),
                og_image: None,
                locale,
            },
        ),
        json_ld: vec![medical_business(site, description)],
    }
}

pub fn treatment_document(site: &str, locale: Locale, t: &Treatment) -> SeoDocument {
    let name = pick(locale, &t.title_en, &t.title_ar);
    let title = pick_opt(locale, t.seo_title_en.as_deref(), t.seo_title_ar.as_deref())
        .unwrap_or_else(|| name.to_string());
    let description = pick_opt(locale, t.seo_desc_en.as_deref(), t.seo_desc_ar.as_deref())
        .or_else(|| pick_opt(locale, t.summary_en.as_deref(), t.summary_ar.as_deref()))
        .unwrap_or_default();
    let path = format!("/{locale}/treatments/{}", t.slug);
    let section = match locale {
        Locale::En => "Treatments",
        Locale::Ar => "العلاجات",
    };

    let cost = match (t.cost_min, t.cost_max) {
        (Some(min), Some(max)) => Some(CostRange {
            min,
            max,
            currency: t.currency.clone(),
        }),
        _ => None,
    };

    let mut json_ld = vec![
        medical_procedure(MedicalProcedureInput {
            name: name.to_string(),
            description: description.clone(),
            procedure_type: None,
            url: Some(absolute_url(site, &path)),
            cost,
        }),
        crumbs(
            site,
            locale,
            (section, &format!("/{locale}/treatments")),
            (name, &path),
        ),
    ];
    if let Some(faq) = &t.faq {
        let items = faq_items_from_json(faq, locale);
        if !items.is_empty() {
            json_ld.push(faq_page(&items));
        }
    }

    SeoDocument {
        metadata: page_metadata(
            site,
            PageMetadataInput {
                title,
                description,
                keywords: vec![name.to_string()],
                canonical: Some(path),
                og_image: None,
                locale,
            },
        ),
        json_ld,
    }
}

/// `images` holds either plain URLs or `{url, ..}` objects.
fn first_image(images: Option<&Value>) -> Option<String> {
    let first = images?.as_array()?.first()?;
    match first {
        Value::String(url) => Some(url.clone()),
        Value::Object(map) => map.get("url")?.as_str().map(str::to_string),
        _ => None,
    }
}

/// Every string leaf of a content-blocks document, space separated.
fn blocks_text(blocks: Option<&Value>) -> String {
    fn collect<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
        match value {
            Value::String(s) => out.push(s),
            Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
            Value::Object(map) => map.values().for_each(|v| collect(v, out)),
            _ => {}
        }
    }
    let mut parts = Vec::new();
    if let Some(blocks) = blocks {
        collect(blocks, &mut parts);
    }
    parts.join(" ")
}

pub fn hospital_document(site: &str, locale: Locale, h: &Hospital) -> SeoDocument {
    let name = pick(locale, &h.name_en, &h.name_ar);
    let alternate = match locale {
        Locale::En => &h.name_ar,
        Locale::Ar => &h.name_en,
    };
    let title = pick_opt(locale, h.seo_title_en.as_deref(), h.seo_title_ar.as_deref())
        .unwrap_or_else(|| format!("{name}, {}", h.city));
    let description = pick_opt(locale, h.seo_desc_en.as_deref(), h.seo_desc_ar.as_deref())
        .or_else(|| pick_opt(locale, h.description_en.as_deref(), h.description_ar.as_deref()))
        .unwrap_or_default();
    let path = format!("/{locale}/hospitals/{}", h.slug);
    let image = first_image(h.images.as_ref());
    let section = match locale {
        Locale::En => "Hospitals",
        Locale::Ar => "المستشفيات",
    };

    let json_ld = vec![
        hospital(
            site,
            HospitalInput {
                name: name.to_string(),
                alternate_name: Some(alternate.clone()).filter(|n| !n.trim().is_empty()),
                description: Some(description.clone()).filter(|d| !d.is_empty()),
                street_address: h.address.clone(),
                city: Some(h.city.clone()),
                image: image.clone(),
                url: Some(absolute_url(site, &path)),
                accreditations: h.accreditations.clone(),
                languages: h.languages_supported.clone(),
            },
        ),
        crumbs(
            site,
            locale,
            (section, &format!("/{locale}/hospitals")),
            (name, &path),
        ),
    ];

    SeoDocument {
        metadata: page_metadata(
            site,
            PageMetadataInput {
                title,
                description,
                keywords: vec![name.to_string(), h.city.clone()],
                canonical: Some(path),
                og_image: image,
                locale,
            },
        ),
        json_ld,
    }
}

pub fn doctor_document(
    site: &str,
    locale: Locale,
    d: &Doctor,
    employer: Option<&Hospital>,
) -> SeoDocument {
    let name = pick(locale, &d.name_en, &d.name_ar);
    let title = pick_opt(locale, d.seo_title_en.as_deref(), d.seo_title_ar.as_deref())
        .unwrap_or_else(|| name.to_string());
    let description = pick_opt(locale, d.seo_desc_en.as_deref(), d.seo_desc_ar.as_deref())
        .or_else(|| pick_opt(locale, d.bio_en.as_deref(), d.bio_ar.as_deref()))
        .unwrap_or_default();
    let path = format!("/{locale}/doctors/{}", d.slug);
    let section = match locale {
        Locale::En => "Doctors",
        Locale::Ar => "الأطباء",
    };

    let json_ld = vec![
        physician(
            site,
            PhysicianInput {
                name: name.to_string(),
                description: Some(description.clone()).filter(|d| !d.is_empty()),
                specialties: d.specialties.clone(),
                qualifications: d.qualifications.clone(),
                hospital_name: employer.map(|h| pick(locale, &h.name_en, &h.name_ar).to_string()),
                hospital_city: employer.map(|h| h.city.clone()),
                image: d.profile_image.clone(),
                url: Some(absolute_url(site, &path)),
            },
        ),
        crumbs(
            site,
            locale,
            (section, &format!("/{locale}/doctors")),
            (name, &path),
        ),
    ];

    let mut keywords = vec![name.to_string()];
    keywords.extend(d.specialties.iter().cloned());

    SeoDocument {
        metadata: page_metadata(
            site,
            PageMetadataInput {
                title,
                description,
                keywords,
                canonical: Some(path),
                og_image: d.profile_image.clone(),
                locale,
            },
        ),
        json_ld,
    }
}

pub fn content_document(site: &str, locale: Locale, page: &ContentPage) -> SeoDocument {
    let headline = pick(locale, &page.title_en, &page.title_ar);
    let title = pick_opt(locale, page.seo_title_en.as_deref(), page.seo_title_ar.as_deref())
        .unwrap_or_else(|| headline.to_string());
    let description = pick_opt(locale, page.seo_desc_en.as_deref(), page.seo_desc_ar.as_deref())
        .or_else(|| pick_opt(locale, page.excerpt_en.as_deref(), page.excerpt_ar.as_deref()))
        .unwrap_or_default();
    let path = if page.page_type == CONTENT_TYPE_BLOG {
        format!("/{locale}/blog/{}", page.slug)
    } else {
        format!("/{locale}/{}", page.slug)
    };

    let mut json_ld = Vec::new();
    if page.page_type == CONTENT_TYPE_BLOG {
        json_ld.push(blog_posting(
            site,
            BlogPostingInput {
                headline: headline.to_string(),
                description: description.clone(),
                author: page.author.clone(),
                date_published: page.published_at.map(|t| t.to_rfc3339()),
                date_modified: Some(page.updated_at.to_rfc3339()),
                image: page.featured_image.clone(),
                url: absolute_url(site, &path),
                locale,
                body: blocks_text(match locale {
                    Locale::Ar if page.blocks_ar.is_some() => page.blocks_ar.as_ref(),
                    _ => page.blocks_en.as_ref(),
                }),
            },
        ));
        let section = match locale {
            Locale::En => "Blog",
            Locale::Ar => "المدونة",
        };
        json_ld.push(crumbs(
            site,
            locale,
            (section, &format!("/{locale}/blog")),
            (headline, &path),
        ));
    } else {
        json_ld.push(breadcrumb_list(&[
            home_crumb(site, locale),
            BreadcrumbItem {
                name: headline.to_string(),
                url: absolute_url(site, &path),
            },
        ]));
    }

    SeoDocument {
        metadata: page_metadata(
            site,
            PageMetadataInput {
                title,
                description,
                keywords: Vec::new(),
                canonical: Some(path),
                og_image: page.featured_image.clone(),
                locale,
            },
        ),
        json_ld,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    const SITE: &str = "https://shifaalhind.com";

    fn treatment() -> Treatment {
        let now = Utc::now();
        Treatment {
            id: 1,
            slug: "knee-replacement".into(),
            title_en: "Knee Replacement".into(),
            title_ar: "استبدال الركبة".into(),
            summary_en: Some("Total knee arthroplasty in Chennai".into()),
            summary_ar: None,
            content_blocks_en: None,
            content_blocks_ar: None,
            cost_min: Some(4000.0),
            cost_max: Some(6500.0),
            currency: "USD".into(),
            faq: Some(json!([{"q_en": "How long is recovery?", "a_en": "Six weeks.",
                              "q_ar": "كم مدة التعافي؟", "a_ar": "ستة أسابيع."}])),
            hospital_ids: vec![],
            seo_title_en: None,
            seo_title_ar: None,
            seo_desc_en: None,
            seo_desc_ar: None,
            published: true,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn treatment_document_has_procedure_breadcrumbs_and_faq() {
        let doc = treatment_document(SITE, Locale::En, &treatment());
        assert_eq!(doc.metadata.title, "Knee Replacement | Shifa AlHind");
        assert_eq!(
            doc.metadata.canonical,
            "https://shifaalhind.com/en/treatments/knee-replacement"
        );
        assert_eq!(doc.metadata.description, "Total knee arthroplasty in Chennai");
        assert_eq!(doc.json_ld.len(), 3);
        assert_eq!(doc.json_ld[0]["@type"], "MedicalProcedure");
        assert_eq!(doc.json_ld[0]["cost"]["minValue"], 4000.0);
        assert_eq!(doc.json_ld[1]["itemListElement"][2]["name"], "Knee Replacement");
        assert_eq!(doc.json_ld[2]["@type"], "FAQPage");
    }

    #[test]
    fn arabic_document_falls_back_to_english_where_missing() {
        let doc = treatment_document(SITE, Locale::Ar, &treatment());
        assert!(doc.metadata.title.starts_with("استبدال الركبة"));
        // No Arabic summary is stored.
        assert_eq!(doc.metadata.description, "Total knee arthroplasty in Chennai");
        assert_eq!(doc.json_ld[2]["mainEntity"][0]["name"], "كم مدة التعافي؟");
    }

    #[test]
    fn home_document_describes_the_agency() {
        let doc = home_document(SITE, Locale::Ar);
        assert_eq!(doc.metadata.canonical, "https://shifaalhind.com/ar");
        assert_eq!(doc.json_ld.len(), 1);
        assert_eq!(doc.json_ld[0]["@type"], "MedicalBusiness");
        assert_eq!(doc.json_ld[0]["description"], SITE_DESCRIPTION_AR);
    }

    #[test]
    fn blocks_text_collects_nested_strings() {
        let blocks = json!([
            {"type": "heading", "text": "Recovery"},
            {"type": "list", "items": ["Rest", "Physio"], "level": 2}
        ]);
        let text = blocks_text(Some(&blocks));
        for word in ["Recovery", "Rest", "Physio", "heading"] {
            assert!(text.contains(word), "{word}");
        }
        assert_eq!(blocks_text(None), "");
    }

    #[test]
    fn first_image_accepts_strings_and_objects() {
        assert_eq!(
            first_image(Some(&json!(["/img/a.jpg", "/img/b.jpg"]))).as_deref(),
            Some("/img/a.jpg")
        );
        assert_eq!(
            first_image(Some(&json!([{"url": "/img/c.jpg", "alt": "lobby"}]))).as_deref(),
            Some("/img/c.jpg")
        );
        assert_eq!(first_image(Some(&json!([]))), None);
        assert_eq!(first_image(None), None);
    }
}
