//! Public consultation form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shifa_core::lead::LeadInput;
use shifa_core::types::DbId;
use shifa_db::models::booking::CreateBooking;
use shifa_db::repositories::BookingRepo;
use shifa_events::ConsultationEmail;
use validator::Validate;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Shown in emails when the lead names no treatment.
const GENERAL_CONSULTATION: &str = "General consultation";

#[derive(Debug, Serialize)]
pub struct LeadCreated {
    pub id: DbId,
    pub patient_name: String,
    pub email: String,
}

/// POST /api/v1/lead
///
/// Stores the request as a `LEAD` booking, then queues the patient
/// confirmation and admin notification emails without waiting for them.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<LeadInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<LeadCreated>>)> {
    input.validate()?;
    let locale = input.locale();

    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            patient_name: input.patient_name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone.trim().to_string(),
            country_of_origin: input.country_of_origin.trim().to_string(),
            locale: locale.as_str().to_string(),
            treatment_id: input.treatment_id,
            hospital_id: input.hospital_id,
            doctor_id: input.doctor_id,
            package_id: input.package_id,
            preferred_dates: input.preferred_dates,
            notes: input.notes,
        },
    )
    .await?;

    tracing::info!(
        booking_id = booking.id,
        country = %booking.country_of_origin,
        locale = %booking.locale,
        "Consultation request received"
    );

    let treatment = treatment_title(&state, booking.id, booking.treatment_id).await;
    state.notifier.consultation_received(ConsultationEmail {
        name: booking.patient_name.clone(),
        email: booking.email.clone(),
        phone: booking.phone.clone(),
        treatment,
        message: booking.notes.clone(),
        locale,
    });

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            LeadCreated {
                id: booking.id,
                patient_name: booking.patient_name,
                email: booking.email,
            },
            "Consultation request submitted successfully",
        )),
    ))
}

/// Display title of the requested treatment. Lookup failures fall back to
/// the generic label; the lead itself is already stored.
async fn treatment_title(state: &AppState, booking_id: DbId, treatment_id: Option<DbId>) -> String {
    if treatment_id.is_none() {
        return GENERAL_CONSULTATION.to_string();
    }
    match BookingRepo::find_with_refs(&state.pool, booking_id).await {
        Ok(Some(refs)) => refs
            .treatment_title_en
            .unwrap_or_else(|| GENERAL_CONSULTATION.to_string()),
        Ok(None) => GENERAL_CONSULTATION.to_string(),
        Err(e) => {
            tracing::warn!(booking_id, error = %e, "Treatment lookup for lead email failed");
            GENERAL_CONSULTATION.to_string()
        }
    }
}
