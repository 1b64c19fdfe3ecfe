// libs/doctor-cell/src/services/ranking.rs
use std::cmp::Ordering;

use tracing::debug;

use shared_config::RankingWeights;

use crate::models::{Doctor, SortStrategy};

/// Orders an already-filtered doctor list.
///
/// All strategies use a stable sort, so doctors that compare equal keep the
/// order the filter produced. Scores are plain `f64` and compared with a
/// total fallback (`Equal`) so a stray NaN can't poison the sort.
#[derive(Debug, Clone, Default)]
pub struct DoctorRanker {
    weights: RankingWeights,
}

impl DoctorRanker {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn rank(&self, doctors: Vec<Doctor>, strategy: SortStrategy) -> Vec<Doctor> {
        debug!("Ranking {} doctors by {:?}", doctors.len(), strategy);

        let mut doctors = doctors;
        match strategy {
            SortStrategy::Rating => {
                doctors.sort_by(|a, b| descending(a.effective_rating(), b.effective_rating()));
            }
            SortStrategy::Experience => {
                doctors.sort_by(|a, b| b.experience_years().cmp(&a.experience_years()));
            }
            SortStrategy::Price => {
                doctors.sort_by(|a, b| ascending(a.fee(), b.fee()));
            }
            SortStrategy::Best => {
                doctors.sort_by(|a, b| descending(self.best_score(a), self.best_score(b)));
            }
            SortStrategy::Availability => {
                // Deterministic stand-in for "most available": doctors accepting
                // bookings first, then whoever offers more consultation modes.
                doctors.sort_by(|a, b| {
                    b.available
                        .cmp(&a.available)
                        .then_with(|| b.modes().len().cmp(&a.modes().len()))
                });
            }
        }

        doctors
    }

    /// Volume term (saturating), rating term, and a flat bonus for having reviews.
    pub fn best_score(&self, doctor: &Doctor) -> f64 {
        let w = &self.weights;

        let volume = if w.appointment_saturation > 0.0 {
            (doctor.appointment_count() / w.appointment_saturation).min(1.0)
        } else {
            1.0
        };
        let rating = doctor.effective_rating() / 5.0;
        let review_bonus = if doctor.review_count() > 0 { w.review_bonus } else { 0.0 };

        w.volume_weight * volume + w.rating_weight * rating + review_bonus
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
