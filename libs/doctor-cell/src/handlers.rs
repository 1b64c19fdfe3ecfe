use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    ConsultationType, DoctorError, FeeRange, FilterCriteria, SortStrategy,
};
use crate::services::{
    availability::SlotAvailabilityResolver,
    doctor::DoctorSearchService,
    scheduling::SupabaseScheduleService,
};

// Query parameters for different endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DoctorSearchQuery {
    pub query: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
    pub rating: Option<String>,
    pub location: Option<String>,
    pub fee_min: Option<f64>,
    pub fee_max: Option<f64>,
    pub gender: Option<String>,
    /// Comma separated, e.g. `video,physical`.
    pub modes: Option<String>,
    pub sort: Option<String>,
}

impl DoctorSearchQuery {
    pub fn into_criteria(self) -> Result<(FilterCriteria, SortStrategy), DoctorError> {
        let modes = self
            .modes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .map(str::parse::<ConsultationType>)
            .collect::<Result<HashSet<_>, _>>()?;

        let criteria = FilterCriteria {
            query: self.query,
            specialization: self.specialization,
            experience: self.experience.as_deref().unwrap_or_default().parse().unwrap_or_default(),
            rating: self.rating.as_deref().unwrap_or_default().parse().unwrap_or_default(),
            location: self.location,
            fee: FeeRange {
                min: self.fee_min,
                max: self.fee_max,
            },
            gender: self.gender,
            modes,
        };

        let strategy = self.sort.as_deref().unwrap_or_default().parse().unwrap_or_default();

        Ok((criteria, strategy))
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
}

impl From<DoctorError> for AppError {
    fn from(e: DoctorError) -> Self {
        match e {
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            DoctorError::ValidationError(msg) => AppError::BadRequest(msg),
            DoctorError::DirectoryError(msg) => AppError::ExternalService(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let (criteria, strategy) = query.into_criteria()?;

    let search_service = DoctorSearchService::from_config(&state);
    let doctors = search_service.search(&criteria, strategy).await;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len(),
        "sort": strategy,
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let search_service = DoctorSearchService::from_config(&state);
    let doctor = search_service.get_doctor(&doctor_id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", raw)))?,
        ),
        None => None,
    };

    let resolver = SlotAvailabilityResolver::new(Arc::new(SupabaseScheduleService::new(&state)));
    let resolution = resolver.resolve_detailed(Some(&doctor_id), date).await;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": date,
        "slots": resolution.slots,
        "source": resolution.source,
    })))
}
