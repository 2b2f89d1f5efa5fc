//! Admin booking management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use shifa_core::booking::{plan_status_change, BookingStatus};
use shifa_core::error::CoreError;
use shifa_core::locale::Locale;
use shifa_core::pagination::{clamp_limit, clamp_offset};
use shifa_core::types::DbId;
use shifa_db::models::booking::{
    Booking, BookingChanges, BookingFilter, BookingWithRefs, UpdateBooking,
};
use shifa_db::repositories::BookingRepo;
use shifa_events::BookingEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BookingListParams {
    pub status: Option<String>,
    pub country: Option<String>,
    pub treatment_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn parse_status(raw: &str) -> Result<BookingStatus, AppError> {
    raw.trim().parse().map_err(AppError::BadRequest)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id,
    })
}

/// GET /api/v1/bookings
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<ApiResponse<Vec<BookingWithRefs>>>> {
    let status = params
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .map(|s| s.as_str().to_string());

    let filter = BookingFilter {
        status,
        country: params.country.filter(|c| !c.trim().is_empty()),
        treatment_id: params.treatment_id,
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let (bookings, total) = BookingRepo::list(&state.pool, &filter).await?;

    Ok(Json(ApiResponse::list(
        bookings,
        ListMeta {
            total,
            limit: filter.limit,
            offset: filter.offset,
        },
    )))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<BookingWithRefs>>> {
    let booking = BookingRepo::find_with_refs(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// PATCH /api/v1/bookings/{id}
///
/// A status change stamps `confirmed_at` / `completed_at` the first time the
/// booking enters `CONFIRMED` / `DISCHARGED`. Entering `CONFIRMED` from any
/// other status queues the booking confirmation emails.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBooking>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let requested = input.status.as_deref().map(parse_status).transpose()?;

    let existing = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut changes = BookingChanges {
        status: None,
        confirmed_at: None,
        completed_at: None,
        admin_notes: input.admin_notes,
        treatment_id: input.treatment_id,
        hospital_id: input.hospital_id,
        doctor_id: input.doctor_id,
        package_id: input.package_id,
        preferred_dates: input.preferred_dates,
    };

    let mut notify_confirmed = false;
    if let Some(requested) = requested {
        let current: BookingStatus = existing
            .status
            .parse()
            .map_err(AppError::InternalError)?;
        let change = plan_status_change(
            current,
            requested,
            existing.confirmed_at,
            existing.completed_at,
            Utc::now(),
        );
        changes.status = Some(change.status.as_str().to_string());
        changes.confirmed_at = change.confirmed_at;
        changes.completed_at = change.completed_at;
        notify_confirmed = change.notify_confirmed;
    }

    let booking = BookingRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        booking_id = booking.id,
        status = %booking.status,
        user_id = user.user_id,
        "Booking updated"
    );

    if notify_confirmed {
        notify_booking_confirmed(&state, booking.id).await;
    }

    Ok(Json(ApiResponse::ok(booking)))
}

/// DELETE /api/v1/bookings/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BookingRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(booking_id = id, user_id = admin.user_id, "Booking archived");
    Ok(StatusCode::NO_CONTENT)
}

async fn notify_booking_confirmed(state: &AppState, booking_id: DbId) {
    match BookingRepo::find_with_refs(&state.pool, booking_id).await {
        Ok(Some(refs)) => {
            state.notifier.booking_confirmed(booking_email(refs));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(booking_id, error = %e, "Booking lookup for confirmation email failed");
        }
    }
}

fn booking_email(refs: BookingWithRefs) -> BookingEmail {
    let preferred_date = refs.booking.preferred_dates.as_ref().and_then(first_preferred_date);
    BookingEmail {
        locale: Locale::parse_or_default(Some(&refs.booking.locale)),
        name: refs.booking.patient_name,
        email: refs.booking.email,
        phone: refs.booking.phone,
        treatment: refs
            .treatment_title_en
            .or(refs.package_name_en)
            .unwrap_or_else(|| "Medical treatment".to_string()),
        hospital_name: refs.hospital_name_en,
        doctor_name: refs.doctor_name_en,
        preferred_date,
    }
}

/// `preferred_dates` is free-form JSON: a string, an array of strings, or an
/// object with a `start` key.
fn first_preferred_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_preferred_date),
        Value::Object(map) => map.get("start").and_then(first_preferred_date),
        _ => None,
    }
}
