// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use doctor_cell::services::doctor::{DoctorDirectory, SupabaseDoctorDirectory};
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AppointmentError, BookingRequest, TriageRequest};
use crate::services::{booking::BookingService, triage::ReasonClassifier};

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        match e {
            AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::DirectoryError(msg) => AppError::ExternalService(msg),
            AppointmentError::StoreError(msg) => AppError::ExternalService(msg),
        }
    }
}

/// Classification preview while the patient is still filling in the form.
/// A doctor that cannot be looked up only loses the specialty fallback.
#[axum::debug_handler]
pub async fn triage_reason(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<TriageRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor_id = request
        .doctor_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let doctor = match doctor_id {
        Some(doctor_id) => SupabaseDoctorDirectory::new(&state)
            .get_doctor(doctor_id)
            .await
            .unwrap_or_else(|e| {
                warn!("Doctor lookup failed during triage for {}: {}", doctor_id, e);
                None
            }),
        None => None,
    };

    let result = ReasonClassifier::default().classify(&request, doctor.as_ref());

    Ok(Json(json!(result)))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking_service = BookingService::from_config(&state);
    let appointment = booking_service.book(&request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
