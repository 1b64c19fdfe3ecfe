use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Doctor, DoctorError, FilterCriteria, SortStrategy};
use crate::services::filtering::DoctorFacetFilter;
use crate::services::ranking::DoctorRanker;

#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn get_all_doctors(&self) -> Result<Vec<Doctor>>;

    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>>;
}

/// Reads doctor profiles from the `doctors` table. Only approved profiles are
/// listed; rows that fail to deserialize are skipped rather than failing the
/// whole listing.
pub struct SupabaseDoctorDirectory {
    supabase: SupabaseClient,
}

impl SupabaseDoctorDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

fn parse_rows(rows: Vec<Value>) -> Vec<Doctor> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Doctor>(row) {
            Ok(doctor) => Some(doctor),
            Err(e) => {
                warn!("Skipping malformed doctor row: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl DoctorDirectory for SupabaseDoctorDirectory {
    async fn get_all_doctors(&self) -> Result<Vec<Doctor>> {
        debug!("Fetching approved doctors");

        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/doctors?profile_status=eq.approved",
            None,
        ).await?;

        Ok(parse_rows(rows))
    }

    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        debug!("Fetching doctor {}", doctor_id);

        let path = format!("/rest/v1/doctors?id=eq.{}&limit=1", urlencoding::encode(doctor_id));
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        Ok(parse_rows(rows).into_iter().next())
    }
}

/// Directory → facet filter → ranking.
pub struct DoctorSearchService {
    directory: Arc<dyn DoctorDirectory>,
    ranker: DoctorRanker,
}

impl DoctorSearchService {
    pub fn new(directory: Arc<dyn DoctorDirectory>, ranker: DoctorRanker) -> Self {
        Self { directory, ranker }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(SupabaseDoctorDirectory::new(config)),
            DoctorRanker::new(config.ranking),
        )
    }

    /// Never fails: a directory outage yields an empty list.
    pub async fn search(&self, criteria: &FilterCriteria, strategy: SortStrategy) -> Vec<Doctor> {
        let doctors = match self.directory.get_all_doctors().await {
            Ok(doctors) => doctors,
            Err(e) => {
                error!("Doctor directory unavailable: {}", e);
                return vec![];
            }
        };

        let total = doctors.len();
        let filtered = DoctorFacetFilter::filter(&doctors, criteria);
        let ranked = self.ranker.rank(filtered, strategy);

        info!("Doctor search matched {} of {} doctors", ranked.len(), total);
        ranked
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        self.directory
            .get_doctor(doctor_id)
            .await
            .map_err(|e| DoctorError::DirectoryError(e.to_string()))?
            .ok_or(DoctorError::NotFound)
    }
}
