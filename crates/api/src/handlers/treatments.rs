//! Handlers for the `/treatments` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shifa_core::slug::{resolve_slug, validate_slug};
use shifa_db::models::treatment::{CreateTreatment, Treatment, TreatmentFilter, UpdateTreatment};
use shifa_db::repositories::TreatmentRepo;

use super::{require_text, visible_filter};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::query::CatalogListParams;
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Treatment '{slug}' not found"))
}

/// GET /api/v1/treatments
pub async fn list(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<CatalogListParams>,
) -> AppResult<Json<ApiResponse<Vec<Treatment>>>> {
    let (limit, offset) = params.pagination();
    let filter = TreatmentFilter {
        published: visible_filter(&viewer, params.published),
        limit,
        offset,
    };
    let (items, total) = TreatmentRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(items, ListMeta { total, limit, offset })))
}

/// GET /api/v1/treatments/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Treatment>>> {
    let treatment = TreatmentRepo::find_by_slug(&state.pool, &slug, !viewer.is_authenticated())
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::ok(treatment)))
}

/// POST /api/v1/treatments
///
/// A blank `slug` is derived from `title_en`.
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(mut input): Json<CreateTreatment>,
) -> AppResult<(StatusCode, Json<ApiResponse<Treatment>>)> {
    require_text(&[("title_en", &input.title_en), ("title_ar", &input.title_ar)])?;
    input.slug = resolve_slug(&input.slug, &input.title_en)?;

    let treatment = TreatmentRepo::create(&state.pool, &input).await?;
    tracing::info!(treatment_id = treatment.id, slug = %treatment.slug, user_id = user.user_id, "Treatment created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(treatment))))
}

/// PATCH /api/v1/treatments/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(slug): Path<String>,
    Json(input): Json<UpdateTreatment>,
) -> AppResult<Json<ApiResponse<Treatment>>> {
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }

    let treatment = TreatmentRepo::update_by_slug(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    tracing::info!(treatment_id = treatment.id, slug = %treatment.slug, user_id = user.user_id, "Treatment updated");
    Ok(Json(ApiResponse::ok(treatment)))
}

/// DELETE /api/v1/treatments/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if !TreatmentRepo::soft_delete_by_slug(&state.pool, &slug).await? {
        return Err(not_found(&slug));
    }
    tracing::info!(slug = %slug, user_id = admin.user_id, "Treatment archived");
    Ok(StatusCode::NO_CONTENT)
}
