use std::env;
use tracing::warn;

/// Calibration for the `best` doctor ordering.
///
/// The defaults are hand-picked, not derived: a doctor saturates the volume
/// term at 500 completed appointments, and having any review at all earns a
/// flat 0.1 bonus. Changing them changes ranking output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub volume_weight: f64,
    pub appointment_saturation: f64,
    pub rating_weight: f64,
    pub review_bonus: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            volume_weight: 0.6,
            appointment_saturation: 500.0,
            rating_weight: 0.4,
            review_bonus: 0.1,
        }
    }
}

impl RankingWeights {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            volume_weight: env_f64("BEST_SCORE_VOLUME_WEIGHT", defaults.volume_weight),
            appointment_saturation: env_f64(
                "BEST_SCORE_APPOINTMENT_SATURATION",
                defaults.appointment_saturation,
            ),
            rating_weight: env_f64("BEST_SCORE_RATING_WEIGHT", defaults.rating_weight),
            review_bonus: env_f64("BEST_SCORE_REVIEW_BONUS", defaults.review_bonus),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub ranking: RankingWeights,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            ranking: RankingWeights::from_env(),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                warn!("{} is not a valid number ({}), using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
