//! Public consultation-request (lead) schema.
//!
//! Field rules: name ≥ 2 chars, valid email, phone ≥ 10 chars, country
//! required. Every text field deserializes with a default so a missing field
//! surfaces as a field-level validation error rather than a parse failure.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::locale::Locale;
use crate::types::DbId;

/// Payload accepted by `POST /api/v1/lead`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LeadInput {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub patient_name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Phone number must be at least 10 characters"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Country is required"))]
    pub country_of_origin: String,

    pub treatment_id: Option<DbId>,
    pub hospital_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub package_id: Option<DbId>,
    pub preferred_dates: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub locale: Option<String>,
}

impl LeadInput {
    pub fn locale(&self) -> Locale {
        Locale::parse_or_default(self.locale.as_deref())
    }
}

/// One failed rule, reported in the `details` array of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flatten validator output into a stable, field-sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}
