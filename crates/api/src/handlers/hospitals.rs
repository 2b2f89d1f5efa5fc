//! Handlers for the `/hospitals` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shifa_core::pagination::{clamp_limit, clamp_offset};
use shifa_core::slug::validate_slug;
use shifa_db::models::hospital::{CreateHospital, Hospital, HospitalFilter, UpdateHospital};
use shifa_db::repositories::HospitalRepo;

use super::{require_text, visible_filter};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HospitalListParams {
    pub published: Option<bool>,
    /// Case-insensitive exact match.
    pub city: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Hospital '{slug}' not found"))
}

/// GET /api/v1/hospitals
pub async fn list(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<HospitalListParams>,
) -> AppResult<Json<ApiResponse<Vec<Hospital>>>> {
    let filter = HospitalFilter {
        published: visible_filter(&viewer, params.published),
        city: params.city.filter(|c| !c.trim().is_empty()),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let (items, total) = HospitalRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(
        items,
        ListMeta {
            total,
            limit: filter.limit,
            offset: filter.offset,
        },
    )))
}

/// GET /api/v1/hospitals/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Hospital>>> {
    let hospital = HospitalRepo::find_by_slug(&state.pool, &slug, !viewer.is_authenticated())
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::ok(hospital)))
}

/// POST /api/v1/hospitals
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateHospital>,
) -> AppResult<(StatusCode, Json<ApiResponse<Hospital>>)> {
    validate_slug(&input.slug)?;
    require_text(&[
        ("name_en", &input.name_en),
        ("name_ar", &input.name_ar),
        ("city", &input.city),
    ])?;

    let hospital = HospitalRepo::create(&state.pool, &input).await?;
    tracing::info!(hospital_id = hospital.id, slug = %hospital.slug, user_id = user.user_id, "Hospital created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(hospital))))
}

/// PATCH /api/v1/hospitals/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(slug): Path<String>,
    Json(input): Json<UpdateHospital>,
) -> AppResult<Json<ApiResponse<Hospital>>> {
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }

    let hospital = HospitalRepo::update_by_slug(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    tracing::info!(hospital_id = hospital.id, slug = %hospital.slug, user_id = user.user_id, "Hospital updated");
    Ok(Json(ApiResponse::ok(hospital)))
}

/// DELETE /api/v1/hospitals/{slug}
///
/// Doctors keep their rows; only the hospital is archived.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if !HospitalRepo::soft_delete_by_slug(&state.pool, &slug).await? {
        return Err(not_found(&slug));
    }
    tracing::info!(slug = %slug, user_id = admin.user_id, "Hospital archived");
    Ok(StatusCode::NO_CONTENT)
}
