// libs/appointment-cell/src/services/booking.rs

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use doctor_cell::models::Doctor;
use doctor_cell::services::availability::to_24_hour;
use doctor_cell::services::doctor::{DoctorDirectory, SupabaseDoctorDirectory};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{AppointmentError, AppointmentRecord, BookingRequest, PENDING_STATUS};
use crate::services::triage::ReasonClassifier;

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Persists the record and returns the stored row.
    async fn create_appointment(&self, record: &AppointmentRecord) -> Result<Value>;
}

pub struct SupabaseAppointmentStore {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn create_appointment(&self, record: &AppointmentRecord) -> Result<Value> {
        debug!("Inserting appointment {}", record.appointment_number);

        let rows = self
            .supabase
            .insert("/rest/v1/appointments", serde_json::to_value(record)?)
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow!("Appointment insert returned no rows"))
    }
}

pub struct BookingService {
    directory: Arc<dyn DoctorDirectory>,
    store: Arc<dyn AppointmentStore>,
    classifier: ReasonClassifier,
}

impl BookingService {
    pub fn new(directory: Arc<dyn DoctorDirectory>, store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            directory,
            store,
            classifier: ReasonClassifier::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(SupabaseDoctorDirectory::new(config)),
            Arc::new(SupabaseAppointmentStore::new(config)),
        )
    }

    /// Validates the request against the selected doctor and builds the row
    /// that would be stored. Nothing is persisted.
    pub fn prepare(
        &self,
        request: &BookingRequest,
        doctor: Option<&Doctor>,
    ) -> Result<AppointmentRecord, AppointmentError> {
        let doctor = doctor.ok_or(AppointmentError::DoctorNotFound)?;
        if doctor.id != request.doctor_id {
            return Err(AppointmentError::ValidationError(format!(
                "Doctor {} does not match requested doctor {}",
                doctor.id, request.doctor_id
            )));
        }
        if request.patient_id.trim().is_empty() {
            return Err(AppointmentError::ValidationError("Patient is required".to_string()));
        }

        let date = request.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppointmentError::ValidationError(format!("Invalid date: {}", date)))?;

        let time = request.time.trim();
        let time_24h = to_24_hour(time)
            .ok_or_else(|| AppointmentError::ValidationError(format!("Invalid time: {}", time)))?;

        if request.reason.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "Reason for visit is required".to_string(),
            ));
        }

        let mut triage_request = request.triage_request();
        triage_request.date = Some(date.to_string());
        triage_request.time = Some(time.to_string());
        let triage = self.classifier.classify(&triage_request, Some(doctor));
        let specialization = Some(doctor.specialization.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let doctor_name = Some(doctor.display_name().trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(AppointmentRecord {
            patient_id: request.patient_id.clone(),
            patient_name: request.patient_name.clone(),
            doctor_id: doctor.id.clone(),
            doctor_name,
            appointment_date: date.to_string(),
            appointment_time: time.to_string(),
            appointment_time_24h: time_24h,
            appointment_type: request.appointment_type,
            reason: request.reason.trim().to_string(),
            reason_category: triage.category.clone(),
            urgency_level: triage.urgency_level,
            priority_score: triage.priority_score,
            is_priority_case: triage.flagged_for_priority(),
            appointment_number: triage.appointment_number,
            recommended_specialties: triage.recommendations,
            triage_notes: triage.notes,
            specialization,
            status: PENDING_STATUS.to_string(),
        })
    }

    pub async fn book(&self, request: &BookingRequest) -> Result<Value, AppointmentError> {
        debug!("Booking appointment with doctor {} on {}", request.doctor_id, request.date);

        let doctor = self
            .directory
            .get_doctor(&request.doctor_id)
            .await
            .map_err(|e| {
                error!("Doctor lookup failed for {}: {}", request.doctor_id, e);
                AppointmentError::DirectoryError(e.to_string())
            })?;

        let record = self.prepare(request, doctor.as_ref())?;
        if record.is_priority_case {
            warn!(
                "Priority case {} ({}) booked with doctor {}",
                record.appointment_number, record.reason_category, record.doctor_id
            );
        }

        let stored = self.store.create_appointment(&record).await.map_err(|e| {
            error!("Failed to store appointment {}: {}", record.appointment_number, e);
            AppointmentError::StoreError(e.to_string())
        })?;

        info!("Appointment {} created", record.appointment_number);
        Ok(stored)
    }
}
