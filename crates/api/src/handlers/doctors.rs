//! Handlers for the `/doctors` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shifa_core::pagination::{clamp_limit, clamp_offset};
use shifa_core::slug::validate_slug;
use shifa_core::types::DbId;
use shifa_db::models::doctor::{CreateDoctor, Doctor, DoctorFilter, UpdateDoctor};
use shifa_db::repositories::DoctorRepo;

use super::{require_text, visible_filter};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DoctorListParams {
    pub published: Option<bool>,
    pub hospital_id: Option<DbId>,
    /// Exact match against one entry of `specialties`.
    pub specialty: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Doctor '{slug}' not found"))
}

/// GET /api/v1/doctors
pub async fn list(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<DoctorListParams>,
) -> AppResult<Json<ApiResponse<Vec<Doctor>>>> {
    let filter = DoctorFilter {
        published: visible_filter(&viewer, params.published),
        hospital_id: params.hospital_id,
        specialty: params.specialty.filter(|s| !s.trim().is_empty()),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let (items, total) = DoctorRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(
        items,
        ListMeta {
            total,
            limit: filter.limit,
            offset: filter.offset,
        },
    )))
}

/// GET /api/v1/doctors/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Doctor>>> {
    let doctor = DoctorRepo::find_by_slug(&state.pool, &slug, !viewer.is_authenticated())
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::ok(doctor)))
}

/// POST /api/v1/doctors
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateDoctor>,
) -> AppResult<(StatusCode, Json<ApiResponse<Doctor>>)> {
    validate_slug(&input.slug)?;
    require_text(&[("name_en", &input.name_en), ("name_ar", &input.name_ar)])?;

    let doctor = DoctorRepo::create(&state.pool, &input).await?;
    tracing::info!(doctor_id = doctor.id, slug = %doctor.slug, user_id = user.user_id, "Doctor created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(doctor))))
}

/// PATCH /api/v1/doctors/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(slug): Path<String>,
    Json(input): Json<UpdateDoctor>,
) -> AppResult<Json<ApiResponse<Doctor>>> {
    if let Some(new_slug) = &input.slug {
        validate_slug(new_slug)?;
    }

    let doctor = DoctorRepo::update_by_slug(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    tracing::info!(doctor_id = doctor.id, slug = %doctor.slug, user_id = user.user_id, "Doctor updated");
    Ok(Json(ApiResponse::ok(doctor)))
}

/// DELETE /api/v1/doctors/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    if !DoctorRepo::soft_delete_by_slug(&state.pool, &slug).await? {
        return Err(not_found(&slug));
    }
    tracing::info!(slug = %slug, user_id = admin.user_id, "Doctor archived");
    Ok(StatusCode::NO_CONTENT)
}
