//! Generated SEO landing pages served from the content store.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shifa_core::content_store::{
    ArticleParams, CityParams, ContentRecord, TreatmentParams, DEFAULT_RELATED_LIMIT,
    DEFAULT_SEARCH_LIMIT,
};
use shifa_core::markdown::render_markdown;

use crate::error::{AppError, AppResult};
use crate::query::LocaleParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Upper bound for caller-supplied `limit` on related and search queries.
const MAX_PAGE_RESULTS: usize = 50;

/// One landing page with its body rendered to HTML and linked pages.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: ContentRecord,
    pub html: String,
    pub linked: Vec<ContentRecord>,
}

impl PageView {
    fn new(page: &ContentRecord, linked: Vec<&ContentRecord>) -> Self {
        Self {
            html: render_markdown(page.full_content.as_deref().unwrap_or_default()),
            page: page.clone(),
            linked: linked.into_iter().cloned().collect(),
        }
    }
}

fn owned(records: Vec<&ContentRecord>) -> Vec<ContentRecord> {
    records.into_iter().cloned().collect()
}

fn clamp_results(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_RESULTS)
}

/// GET /api/v1/pages/articles/{locale}/{country}/{city}/{treatment}/{slug}
///
/// `linked` holds up to three related articles.
pub async fn article(
    State(state): State<AppState>,
    Path(params): Path<ArticleParams>,
) -> AppResult<Json<ApiResponse<PageView>>> {
    let store = &state.content_store;
    let page = store
        .get_article(&params)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article '{}' not found", params.slug)))?;
    let related = store.related_articles(&page.url, DEFAULT_RELATED_LIMIT).await?;
    Ok(Json(ApiResponse::ok(PageView::new(page, related))))
}

/// GET /api/v1/pages/treatments/{locale}/{country}/{city}/{treatment}
///
/// `linked` holds the articles about the treatment.
pub async fn treatment(
    State(state): State<AppState>,
    Path(params): Path<TreatmentParams>,
) -> AppResult<Json<ApiResponse<PageView>>> {
    let store = &state.content_store;
    let page = store.get_treatment(&params).await?.ok_or_else(|| {
        AppError::NotFound(format!(
            "Treatment page '{}/{}' not found",
            params.city, params.treatment
        ))
    })?;
    let articles = store
        .articles_by_treatment(&params.treatment, &params.locale)
        .await?;
    Ok(Json(ApiResponse::ok(PageView::new(page, articles))))
}

/// GET /api/v1/pages/cities/{locale}/{country}/{city}
///
/// `linked` holds the treatment landings for the city, then its articles.
pub async fn city(
    State(state): State<AppState>,
    Path(params): Path<CityParams>,
) -> AppResult<Json<ApiResponse<PageView>>> {
    let store = &state.content_store;
    let page = store
        .get_city(&params)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City page '{}' not found", params.city)))?;
    let mut linked = store.treatments_by_city(&params.city, &params.locale).await?;
    linked.extend(store.articles_by_city(&params.city, &params.locale).await?);
    Ok(Json(ApiResponse::ok(PageView::new(page, linked))))
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    pub url: String,
    pub limit: Option<usize>,
}

/// GET /api/v1/pages/related?url=&limit=
pub async fn related(
    State(state): State<AppState>,
    Query(params): Query<RelatedParams>,
) -> AppResult<Json<ApiResponse<Vec<ContentRecord>>>> {
    let limit = clamp_results(params.limit, DEFAULT_RELATED_LIMIT);
    let related = state.content_store.related_articles(&params.url, limit).await?;
    Ok(Json(ApiResponse::ok(owned(related))))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/v1/pages/search?q=&locale=&limit=
///
/// A blank query matches nothing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<ContentRecord>>>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Ok(Json(ApiResponse::ok(Vec::new())));
    }
    let locale = params.locale.as_deref().unwrap_or("en");
    let limit = clamp_results(params.limit, DEFAULT_SEARCH_LIMIT);
    let hits = state.content_store.search(query, locale, limit).await?;
    Ok(Json(ApiResponse::ok(owned(hits))))
}

/// GET /api/v1/pages/countries
pub async fn countries(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    Ok(Json(ApiResponse::ok(state.content_store.all_countries().await?)))
}

/// GET /api/v1/pages/countries/{country}/cities?locale=
pub async fn cities_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<Json<ApiResponse<Vec<ContentRecord>>>> {
    let cities = state
        .content_store
        .cities_by_country(&country, params.locale().as_str())
        .await?;
    Ok(Json(ApiResponse::ok(owned(cities))))
}

/// GET /api/v1/pages/treatment-types
pub async fn treatment_types(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    Ok(Json(ApiResponse::ok(
        state.content_store.all_treatment_types().await?,
    )))
}
