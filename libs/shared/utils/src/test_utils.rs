use std::sync::Arc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::{AppConfig, RankingWeights};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            ranking: RankingWeights::default(),
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_response(id: &str, name: &str, specialization: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "specialization": specialization,
            "bio": "Experienced physician",
            "experience": "8",
            "rating": 4.5,
            "total_reviews": 12,
            "total_appointments": 140,
            "consultation_fee": 500,
            "city": "Bengaluru",
            "state": "Karnataka",
            "gender": "female",
            "profile_status": "approved",
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn schedule_response(doctor_id: &str, day: &str, start: &str, end: &str, slot_duration: i64) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "day": day,
            "start_time": start,
            "end_time": end,
            "slot_duration": slot_duration,
            "is_available": true
        })
    }

    pub fn booked_time_response(time_24h: &str) -> Value {
        json!({ "appointment_time_24h": time_24h })
    }

    /// Echo of a stored appointment row, as PostgREST returns it with
    /// `Prefer: return=representation`.
    pub fn appointment_response(record: &Value) -> Value {
        let mut row = record.clone();
        if let Some(map) = row.as_object_mut() {
            map.insert("id".to_string(), json!(Uuid::new_v4()));
            map.insert("created_at".to_string(), json!("2024-01-01T00:00:00Z"));
        }
        row
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
