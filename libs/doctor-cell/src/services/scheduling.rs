// libs/doctor-cell/src/services/scheduling.rs
use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{DoctorSchedule, ScheduleEntry};

/// Source of a doctor's bookable start times for one date, in 24-hour `HH:MM`.
/// An empty list means "no schedule set"; callers pick their own fallback.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    async fn get_available_time_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>>;
}

pub struct SupabaseScheduleService {
    supabase: SupabaseClient,
}

#[derive(Debug, Deserialize)]
struct BookedAppointment {
    #[serde(alias = "appointmentTime")]
    appointment_time_24h: Option<String>,
}

impl SupabaseScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn get_schedule_for_day(&self, doctor_id: &str, day: &str) -> Result<Option<DoctorSchedule>> {
        let path = format!(
            "/rest/v1/doctor_schedules?doctor_id=eq.{}&day=eq.{}&is_available=eq.true&is_deleted=not.is.true&limit=1",
            urlencoding::encode(doctor_id),
            day
        );

        let schedules: Vec<DoctorSchedule> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(schedules.into_iter().next())
    }

    async fn get_booked_times(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<String>> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&appointment_date=eq.{}&status=neq.cancelled&select=appointment_time_24h",
            urlencoding::encode(doctor_id),
            date.format("%Y-%m-%d")
        );

        let booked: Vec<BookedAppointment> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(booked.into_iter().filter_map(|b| b.appointment_time_24h).collect())
    }
}

#[async_trait]
impl ScheduleService for SupabaseScheduleService {
    async fn get_available_time_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>> {
        let day = weekday_name(date.weekday());
        debug!("Fetching {} schedule for doctor {} on {}", day, doctor_id, date);

        let Some(schedule) = self.get_schedule_for_day(doctor_id, day).await? else {
            debug!("No schedule set for doctor {} on {}", doctor_id, day);
            return Ok(vec![]);
        };

        let booked = self.get_booked_times(doctor_id, date).await?;

        Ok(expand_schedule(
            &schedule.start_time,
            &schedule.end_time,
            schedule.slot_duration,
            &booked,
        ))
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Walks `[start, end)` in `slot_minutes` steps and returns every start time
/// not already booked. Booked times are compared after normalising to `HH:MM`.
pub fn expand_schedule(
    start: &str,
    end: &str,
    slot_minutes: i64,
    booked: &[String],
) -> Vec<ScheduleEntry> {
    let (Some(start), Some(end)) = (parse_clock(start), parse_clock(end)) else {
        warn!("Unparseable schedule window {:?}-{:?}", start, end);
        return vec![];
    };

    if slot_minutes <= 0 {
        warn!("Schedule slot duration must be positive, got {}", slot_minutes);
        return vec![];
    }

    let booked: HashSet<String> = booked
        .iter()
        .filter_map(|time| parse_clock(time))
        .map(|time| format!("{:02}:{:02}", time.hour(), time.minute()))
        .collect();

    let start_minutes = i64::from(start.hour() * 60 + start.minute());
    let end_minutes = i64::from(end.hour() * 60 + end.minute());

    (start_minutes..end_minutes)
        .step_by(slot_minutes as usize)
        .map(|minutes| format!("{:02}:{:02}", minutes / 60, minutes % 60))
        .filter(|time| !booked.contains(time))
        .map(ScheduleEntry::new)
        .collect()
}
