use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::ConsultationType;

// ==============================================================================
// URGENCY
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Critical,
    High,
    Medium,
    Routine,
    /// Only produced for video visits that match no reason profile.
    Standard,
}

impl UrgencyLevel {
    /// Uppercased first letter, used inside appointment codes.
    pub fn initial(&self) -> char {
        match self {
            UrgencyLevel::Critical => 'C',
            UrgencyLevel::High => 'H',
            UrgencyLevel::Medium => 'M',
            UrgencyLevel::Routine => 'R',
            UrgencyLevel::Standard => 'S',
        }
    }

    pub fn is_priority(&self) -> bool {
        matches!(self, UrgencyLevel::Critical | UrgencyLevel::High)
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyLevel::Critical => write!(f, "critical"),
            UrgencyLevel::High => write!(f, "high"),
            UrgencyLevel::Medium => write!(f, "medium"),
            UrgencyLevel::Routine => write!(f, "routine"),
            UrgencyLevel::Standard => write!(f, "standard"),
        }
    }
}

// ==============================================================================
// REASON PROFILES
// ==============================================================================

/// One row of the reason table. Keywords are lowercase and matched as
/// substrings of the normalized reason text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReasonProfile {
    pub id: &'static str,
    pub category: &'static str,
    pub urgency_level: UrgencyLevel,
    pub priority_score: u8,
    pub keywords: &'static [&'static str],
    pub recommended_specialties: &'static [&'static str],
    pub message: &'static str,
}

impl ReasonProfile {
    pub fn matches(&self, normalized_reason: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_reason.contains(keyword))
    }
}

// ==============================================================================
// TRIAGE
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TriageRequest {
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "type", alias = "appointment_type")]
    pub appointment_type: ConsultationType,
    pub doctor_id: Option<String>,
    /// `YYYY-MM-DD`, carried verbatim into the code hash.
    pub date: Option<String>,
    /// Display time (`"H:MM AM"`), carried verbatim into the code hash.
    pub time: Option<String>,
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageResult {
    pub category: String,
    pub urgency_level: UrgencyLevel,
    pub priority_score: u8,
    pub recommendations: Vec<String>,
    pub notes: String,
    pub appointment_number: String,
    flagged_for_priority: bool,
}

impl TriageResult {
    pub fn new(
        category: impl Into<String>,
        urgency_level: UrgencyLevel,
        priority_score: u8,
        recommendations: Vec<String>,
        notes: impl Into<String>,
        appointment_number: String,
    ) -> Self {
        Self {
            category: category.into(),
            urgency_level,
            priority_score,
            recommendations,
            notes: notes.into(),
            appointment_number,
            flagged_for_priority: urgency_level.is_priority(),
        }
    }

    pub fn flagged_for_priority(&self) -> bool {
        self.flagged_for_priority
    }
}

// ==============================================================================
// BOOKING
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub doctor_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Display time (`"H:MM AM"`)
    pub time: String,
    #[serde(rename = "type", alias = "appointment_type")]
    pub appointment_type: ConsultationType,
    #[serde(default)]
    pub reason: String,
}

impl BookingRequest {
    pub fn triage_request(&self) -> TriageRequest {
        TriageRequest {
            reason: self.reason.clone(),
            appointment_type: self.appointment_type,
            doctor_id: Some(self.doctor_id.clone()),
            date: Some(self.date.clone()),
            time: Some(self.time.clone()),
            patient_id: Some(self.patient_id.clone()),
        }
    }
}

/// Row handed to the appointment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub doctor_id: String,
    pub doctor_name: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_time_24h: String,
    #[serde(rename = "type")]
    pub appointment_type: ConsultationType,
    pub reason: String,
    pub reason_category: String,
    pub urgency_level: UrgencyLevel,
    pub priority_score: u8,
    pub appointment_number: String,
    pub recommended_specialties: Vec<String>,
    pub triage_notes: String,
    pub is_priority_case: bool,
    pub specialization: Option<String>,
    pub status: String,
}

pub const PENDING_STATUS: &str = "pending";

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppointmentError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Doctor directory error: {0}")]
    DirectoryError(String),

    #[error("Appointment store error: {0}")]
    StoreError(String),
}
