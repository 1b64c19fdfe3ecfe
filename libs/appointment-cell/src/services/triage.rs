// libs/appointment-cell/src/services/triage.rs

use tracing::debug;

use doctor_cell::models::{ConsultationType, Doctor};

use crate::models::{ReasonProfile, TriageRequest, TriageResult, UrgencyLevel};
use crate::services::hasher::appointment_code;
use crate::services::profiles::REASON_PROFILES;

pub const GENERAL_CONSULTATION_CATEGORY: &str = "General Consultation";
pub const VIRTUAL_FOLLOW_UP_CATEGORY: &str = "Virtual Follow-up";

pub const GENERAL_CONSULTATION_NOTES: &str =
    "In-person consultation. Please arrive 10 minutes early and bring any previous medical records.";
pub const VIRTUAL_FOLLOW_UP_NOTES: &str =
    "Video consultation. Join from a quiet place with a stable internet connection a few minutes before your slot.";

/// Maps free-text visit reasons onto a profile table. Pure: the same request
/// and doctor always produce the same result.
#[derive(Debug, Clone, Copy)]
pub struct ReasonClassifier {
    profiles: &'static [ReasonProfile],
}

impl Default for ReasonClassifier {
    fn default() -> Self {
        Self::new(REASON_PROFILES)
    }
}

impl ReasonClassifier {
    pub fn new(profiles: &'static [ReasonProfile]) -> Self {
        Self { profiles }
    }

    /// First profile (in table order) with a keyword contained in the reason.
    pub fn match_profile(&self, reason: &str) -> Option<&'static ReasonProfile> {
        let normalized = reason.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        self.profiles.iter().find(|profile| profile.matches(&normalized))
    }

    pub fn classify(&self, request: &TriageRequest, doctor: Option<&Doctor>) -> TriageResult {
        let (category, urgency, priority, recommendations, notes) =
            match self.match_profile(&request.reason) {
                Some(profile) => {
                    debug!("Reason matched profile {}", profile.id);
                    (
                        profile.category,
                        profile.urgency_level,
                        profile.priority_score,
                        profile
                            .recommended_specialties
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                        profile.message,
                    )
                }
                None => {
                    let recommendations = doctor
                        .map(|d| d.specialization.trim())
                        .filter(|s| !s.is_empty())
                        .map(|s| vec![s.to_string()])
                        .unwrap_or_default();

                    match request.appointment_type {
                        ConsultationType::Physical => (
                            GENERAL_CONSULTATION_CATEGORY,
                            UrgencyLevel::Routine,
                            2,
                            recommendations,
                            GENERAL_CONSULTATION_NOTES,
                        ),
                        ConsultationType::Video => (
                            VIRTUAL_FOLLOW_UP_CATEGORY,
                            UrgencyLevel::Standard,
                            1,
                            recommendations,
                            VIRTUAL_FOLLOW_UP_NOTES,
                        ),
                    }
                }
            };

        let code = appointment_code(
            request.appointment_type,
            urgency,
            request.date.as_deref(),
            request.time.as_deref(),
            request.doctor_id.as_deref(),
            request.patient_id.as_deref(),
        );

        TriageResult::new(category, urgency, priority, recommendations, notes, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::hasher::TBD_SENTINEL;
    use regex::Regex;

    fn request(reason: &str, appointment_type: ConsultationType) -> TriageRequest {
        TriageRequest {
            reason: reason.to_string(),
            appointment_type,
            doctor_id: None,
            date: None,
            time: None,
            patient_id: None,
        }
    }

    fn scheduled(reason: &str, appointment_type: ConsultationType) -> TriageRequest {
        TriageRequest {
            doctor_id: Some("doc_8f3kq29".into()),
            date: Some("2026-10-20".into()),
            time: Some("10:30 AM".into()),
            patient_id: Some("patient-77".into()),
            ..request(reason, appointment_type)
        }
    }

    #[test]
    fn test_chest_pain_is_critical() {
        let result = ReasonClassifier::default().classify(
            &request("I have chest pain and shortness of breath", ConsultationType::Physical),
            None,
        );

        assert_eq!(result.category, "Cardiac Evaluation");
        assert_eq!(result.urgency_level, UrgencyLevel::Critical);
        assert_eq!(result.priority_score, 5);
        assert!(result.flagged_for_priority());
    }

    #[test]
    fn test_first_matching_profile_wins() {
        let classifier = ReasonClassifier::default();
        let result = classifier.classify(&request("chest pain and a rash", ConsultationType::Video), None);
        assert_eq!(result.category, "Cardiac Evaluation");

        let result = classifier.classify(&request("Rash on my arm", ConsultationType::Video), None);
        assert_eq!(result.category, "Dermatology Review");
        assert!(!result.flagged_for_priority());
    }

    #[test]
    fn test_reason_is_normalized_before_matching() {
        let result = ReasonClassifier::default()
            .classify(&request("   SEVERE Back Pain  ", ConsultationType::Physical), None);
        assert_eq!(result.category, "Musculoskeletal Assessment");
    }

    #[test]
    fn test_unscheduled_checkup_has_sentinel_code() {
        let result = ReasonClassifier::default()
            .classify(&request("annual physical checkup", ConsultationType::Physical), None);

        assert_eq!(result.category, "Preventive Checkup");
        assert_eq!(result.appointment_number, TBD_SENTINEL);
    }

    #[test]
    fn test_no_match_physical_defaults() {
        let doctor = Doctor {
            id: "doc-1".into(),
            specialization: "Cardiology".into(),
            ..Default::default()
        };
        let result = ReasonClassifier::default()
            .classify(&request("just want to talk", ConsultationType::Physical), Some(&doctor));

        assert_eq!(result.category, GENERAL_CONSULTATION_CATEGORY);
        assert_eq!(result.urgency_level, UrgencyLevel::Routine);
        assert_eq!(result.priority_score, 2);
        assert_eq!(result.recommendations, vec!["Cardiology".to_string()]);
        assert_eq!(result.notes, GENERAL_CONSULTATION_NOTES);
    }

    #[test]
    fn test_no_match_video_defaults() {
        let result = ReasonClassifier::default().classify(&request("", ConsultationType::Video), None);

        assert_eq!(result.category, VIRTUAL_FOLLOW_UP_CATEGORY);
        assert_eq!(result.urgency_level, UrgencyLevel::Standard);
        assert_eq!(result.priority_score, 1);
        assert!(result.recommendations.is_empty());
        assert!(!result.flagged_for_priority());
    }

    #[test]
    fn test_flag_tracks_urgency_for_every_profile() {
        let classifier = ReasonClassifier::default();
        for profile in REASON_PROFILES {
            let result = classifier.classify(&request(profile.keywords[0], ConsultationType::Physical), None);
            assert_eq!(result.category, profile.category, "keyword {:?}", profile.keywords[0]);
            assert_eq!(
                result.flagged_for_priority(),
                matches!(result.urgency_level, UrgencyLevel::Critical | UrgencyLevel::High)
            );
        }
    }

    #[test]
    fn test_scheduled_codes_match_format() {
        let format = Regex::new(r"^(IP|VC)-[CHMRS][0-9A-Z]{4}-[0-9A-Z]{3}$").unwrap();
        let classifier = ReasonClassifier::default();

        for reason in ["chest pain", "fever", "acne", "nothing in particular"] {
            for mode in ConsultationType::ALL {
                let code = classifier.classify(&scheduled(reason, mode), None).appointment_number;
                assert!(format.is_match(&code), "unexpected code {}", code);
            }
        }

        let code = classifier
            .classify(&scheduled("chest pain", ConsultationType::Physical), None)
            .appointment_number;
        assert_eq!(code, "IP-CRQHU-Q29");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = ReasonClassifier::default();
        let request = scheduled("stomach ache", ConsultationType::Video);
        assert_eq!(classifier.classify(&request, None), classifier.classify(&request, None));
    }
}
