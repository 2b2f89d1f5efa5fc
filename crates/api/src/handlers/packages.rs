//! Handlers for the `/packages` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shifa_core::slug::validate_slug;
use shifa_db::models::package::{CreatePackage, Package, PackageFilter, UpdatePackage};
use shifa_db::repositories::PackageRepo;

use super::{require_text, visible_filter};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::query::CatalogListParams;
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Package '{slug}' not found"))
}

/// GET /api/v1/packages
///
/// Cheapest first; packages without a price come last.
pub async fn list(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<CatalogListParams>,
) -> AppResult<Json<ApiResponse<Vec<Package>>>> {
    let (limit, offset) = params.pagination();
    let filter = PackageFilter {
        published: visible_filter(&viewer, params.published),
        limit,
        offset,
    };
    let (items, total) = PackageRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(items, ListMeta { total, limit, offset })))
}

/// GET /api/v1/packages/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Package>>> {
    let package = PackageRepo::find_by_slug(&state.pool, &slug, !viewer.is_authenticated())
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::ok(package)))
}

/// POST /api/v1/packages
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreatePackage>,
) -> AppResult<(StatusCode, Json<ApiResponse<Package>>)> {
    validate_slug(&input.slug)?;
    require_text(&[("name_en", &input.name_en), ("name_ar", &input.name_ar)])?;
    if input.price.is_some_and(|p| p < 0.0) {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let package = PackageRepo::create(&state.pool, &input).await?;
    tracing::info!(package_id = package.id, slug = %package.slug, user_id = user.user_id, "Package created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(package))))
}

/// PATCH /api/v1/packages/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(slug): Path<String>,
    Json(input): Json<UpdatePackage>,
) -> AppResult<Json<ApiResponse<Package>>> {
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }
    if input.price.is_some_and(|p| p < 0.0) {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let package = PackageRepo::update_by_slug(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    tracing::info!(package_id = package.id, slug = %package.slug, user_id = user.user_id, "Package updated");
    Ok(Json(ApiResponse::ok(package)))
}

/// DELETE /api/v1/packages/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if !PackageRepo::soft_delete_by_slug(&state.pool, &slug).await? {
        return Err(not_found(&slug));
    }
    tracing::info!(slug = %slug, user_id = admin.user_id, "Package archived");
    Ok(StatusCode::NO_CONTENT)
}
