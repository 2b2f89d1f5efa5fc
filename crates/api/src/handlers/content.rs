//! Handlers for editorial `/content` pages (blog posts, static pages, FAQs).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shifa_core::pagination::{clamp_limit, clamp_offset};
use shifa_core::slug::{resolve_slug, validate_slug};
use shifa_db::models::content_page::{
    ContentPage, ContentPageFilter, CreateContentPage, UpdateContentPage, CONTENT_TYPES,
    CONTENT_TYPE_PAGE,
};
use shifa_db::repositories::ContentPageRepo;

use super::{require_text, visible_filter};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ContentListParams {
    /// `blog`, `page` or `faq`; defaults to `page`.
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    pub published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Content page '{slug}' not found"))
}

fn check_type(page_type: &str) -> Result<(), AppError> {
    if CONTENT_TYPES.contains(&page_type) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid content type '{page_type}'. Must be one of: {}",
            CONTENT_TYPES.join(", ")
        )))
    }
}

/// GET /api/v1/content
pub async fn list(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<ContentListParams>,
) -> AppResult<Json<ApiResponse<Vec<ContentPage>>>> {
    let page_type = params
        .page_type
        .unwrap_or_else(|| CONTENT_TYPE_PAGE.to_string());
    check_type(&page_type)?;

    let filter = ContentPageFilter {
        page_type,
        published: visible_filter(&viewer, params.published),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let (items, total) = ContentPageRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(
        items,
        ListMeta {
            total,
            limit: filter.limit,
            offset: filter.offset,
        },
    )))
}

/// GET /api/v1/content/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<ContentPage>>> {
    let page = ContentPageRepo::find_by_slug(&state.pool, &slug, !viewer.is_authenticated())
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/v1/content
///
/// Creating a page as published stamps `published_at`. A blank `slug` is
/// derived from `title_en`.
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(mut input): Json<CreateContentPage>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContentPage>>)> {
    if let Some(page_type) = &input.page_type {
        check_type(page_type)?;
    }
    require_text(&[("title_en", &input.title_en), ("title_ar", &input.title_ar)])?;
    input.slug = resolve_slug(&input.slug, &input.title_en)?;

    let page = ContentPageRepo::create(&state.pool, &input).await?;
    tracing::info!(
        content_id = page.id,
        slug = %page.slug,
        page_type = %page.page_type,
        user_id = user.user_id,
        "Content page created"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(page))))
}

/// PATCH /api/v1/content/{slug}
///
/// Setting `published=true` stamps `published_at` unless it is already set.
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(slug): Path<String>,
    Json(input): Json<UpdateContentPage>,
) -> AppResult<Json<ApiResponse<ContentPage>>> {
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }
    if let Some(page_type) = &input.page_type {
        check_type(page_type)?;
    }

    let page = ContentPageRepo::update_by_slug(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    tracing::info!(content_id = page.id, slug = %page.slug, user_id = user.user_id, "Content page updated");
    Ok(Json(ApiResponse::ok(page)))
}

/// DELETE /api/v1/content/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if !ContentPageRepo::soft_delete_by_slug(&state.pool, &slug).await? {
        return Err(not_found(&slug));
    }
    tracing::info!(slug = %slug, user_id = admin.user_id, "Content page archived");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_are_closed() {
        assert!(check_type("blog").is_ok());
        assert!(check_type("faq").is_ok());
        assert!(check_type("Blog").is_err());
        assert!(check_type("news").is_err());
    }
}
