// libs/doctor-cell/src/services/filtering.rs
use crate::models::{Doctor, FilterCriteria};

/// Facet filter over an in-memory doctor list.
///
/// Every facet is an independent predicate and a doctor is kept only when all
/// of them hold. Unset facets (and the literal `"all"`) pass everyone. The
/// consultation-mode facet is an OR across the selected modes, ANDed with the
/// rest like any other facet.
pub struct DoctorFacetFilter;

impl DoctorFacetFilter {
    pub fn filter(doctors: &[Doctor], criteria: &FilterCriteria) -> Vec<Doctor> {
        doctors
            .iter()
            .filter(|doctor| Self::matches(doctor, criteria))
            .cloned()
            .collect()
    }

    pub fn matches(doctor: &Doctor, criteria: &FilterCriteria) -> bool {
        Self::matches_query(doctor, criteria.query.as_deref())
            && Self::matches_specialization(doctor, criteria.specialization.as_deref())
            && criteria.experience.contains(doctor.experience_years())
            && criteria.rating.contains(doctor.effective_rating())
            && Self::matches_location(doctor, criteria.location.as_deref())
            && criteria.fee.contains(doctor.fee())
            && Self::matches_gender(doctor, criteria.gender.as_deref())
            && Self::matches_modes(doctor, criteria)
    }

    fn matches_query(doctor: &Doctor, query: Option<&str>) -> bool {
        let Some(needle) = active_facet(query) else {
            return true;
        };

        contains_ci(doctor.display_name(), &needle)
            || contains_ci(&doctor.name, &needle)
            || doctor.all_specializations().any(|s| contains_ci(s, &needle))
            || doctor.bio.as_deref().is_some_and(|bio| contains_ci(bio, &needle))
    }

    fn matches_specialization(doctor: &Doctor, specialization: Option<&str>) -> bool {
        let Some(wanted) = active_facet(specialization) else {
            return true;
        };

        doctor
            .all_specializations()
            .any(|s| s.trim().to_lowercase() == wanted)
    }

    fn matches_location(doctor: &Doctor, location: Option<&str>) -> bool {
        let Some(needle) = active_facet(location) else {
            return true;
        };

        doctor.location_fields().any(|field| contains_ci(field, &needle))
    }

    fn matches_gender(doctor: &Doctor, gender: Option<&str>) -> bool {
        let Some(wanted) = active_facet(gender) else {
            return true;
        };

        doctor
            .gender
            .as_deref()
            .is_some_and(|g| g.trim().to_lowercase() == wanted)
    }

    fn matches_modes(doctor: &Doctor, criteria: &FilterCriteria) -> bool {
        if criteria.modes.is_empty() {
            return true;
        }

        let offered = doctor.modes();
        criteria.modes.iter().any(|mode| offered.contains(mode))
    }
}

/// Lowercased facet value, or `None` when the facet is blank or `"all"`.
fn active_facet(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(value.to_lowercase())
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
