mod availability;
mod search;

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::oneshot;

use doctor_cell::models::{Doctor, ScheduleEntry};
use doctor_cell::services::{DoctorDirectory, ScheduleService};

/// Schedule double whose answers are released by the test through a oneshot
/// channel, so responses can be made to arrive in any order.
#[derive(Default)]
pub struct GatedSchedule {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<Vec<ScheduleEntry>>>>>,
}

impl GatedSchedule {
    pub fn gate(&self, doctor_id: &str) -> oneshot::Sender<Result<Vec<ScheduleEntry>>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(doctor_id.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ScheduleService for GatedSchedule {
    async fn get_available_time_slots(&self, doctor_id: &str, _date: NaiveDate) -> Result<Vec<ScheduleEntry>> {
        let rx = self.gates.lock().unwrap().remove(doctor_id);
        match rx {
            Some(rx) => rx.await.map_err(|_| anyhow!("gate dropped"))?,
            None => Ok(vec![]),
        }
    }
}

pub struct FixedSchedule(pub Result<Vec<&'static str>, &'static str>);

#[async_trait]
impl ScheduleService for FixedSchedule {
    async fn get_available_time_slots(&self, _doctor_id: &str, _date: NaiveDate) -> Result<Vec<ScheduleEntry>> {
        match &self.0 {
            Ok(times) => Ok(times.iter().map(|t| ScheduleEntry::new(*t)).collect()),
            Err(message) => Err(anyhow!(*message)),
        }
    }
}

pub struct StaticDirectory(pub Result<Vec<Doctor>, &'static str>);

#[async_trait]
impl DoctorDirectory for StaticDirectory {
    async fn get_all_doctors(&self) -> Result<Vec<Doctor>> {
        match &self.0 {
            Ok(doctors) => Ok(doctors.clone()),
            Err(message) => Err(anyhow!(*message)),
        }
    }

    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        let doctors = self.get_all_doctors().await?;
        Ok(doctors.into_iter().find(|d| d.id == doctor_id))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
