// libs/doctor-cell/src/services/availability.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::{ScheduleEntry, SlotResolution, SlotSource, TimeSlot};
use crate::services::scheduling::ScheduleService;

/// Offered whenever a doctor has no schedule for the requested day.
pub const DEFAULT_TIME_SLOTS: [&str; 12] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
];

pub fn default_time_slots() -> Vec<TimeSlot> {
    DEFAULT_TIME_SLOTS
        .iter()
        .map(|slot| TimeSlot(slot.to_string()))
        .collect()
}

/// `"HH:MM"` (24h) to `"H:MM AM|PM"`. Minutes are copied as given.
pub fn to_display_time(time_24h: &str) -> Option<String> {
    let (hours, minutes) = time_24h.trim().split_once(':')?;
    let hour: u32 = hours.parse().ok()?;
    if hour > 23 || minutes.is_empty() || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let display_hour = match hour {
        0 | 12 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let period = if hour < 12 { "AM" } else { "PM" };

    Some(format!("{}:{} {}", display_hour, minutes, period))
}

/// `"H:MM AM|PM"` back to `"HH:MM"`.
pub fn to_24_hour(display: &str) -> Option<String> {
    let (clock, period) = display.trim().split_once(' ')?;
    let (hours, minutes) = clock.split_once(':')?;
    let hour: u32 = hours.parse().ok()?;
    if !(1..=12).contains(&hour) || minutes.is_empty() {
        return None;
    }

    let hour = match period.trim().to_ascii_uppercase().as_str() {
        "AM" => hour % 12,
        "PM" => hour % 12 + 12,
        _ => return None,
    };

    Some(format!("{:02}:{}", hour, minutes))
}

/// Turns a doctor's schedule for a date into display slots, falling back to
/// [`DEFAULT_TIME_SLOTS`] when there is nothing usable to show.
#[derive(Clone)]
pub struct SlotAvailabilityResolver {
    schedule: Arc<dyn ScheduleService>,
}

impl SlotAvailabilityResolver {
    pub fn new(schedule: Arc<dyn ScheduleService>) -> Self {
        Self { schedule }
    }

    pub async fn resolve(&self, doctor_id: Option<&str>, date: Option<NaiveDate>) -> Vec<TimeSlot> {
        self.resolve_detailed(doctor_id, date).await.slots
    }

    pub async fn resolve_detailed(
        &self,
        doctor_id: Option<&str>,
        date: Option<NaiveDate>,
    ) -> SlotResolution {
        let doctor_id = doctor_id.map(str::trim).filter(|id| !id.is_empty());
        let (Some(doctor_id), Some(date)) = (doctor_id, date) else {
            debug!("Doctor or date not selected, offering default slots");
            return Self::template();
        };

        debug!("Resolving slots for doctor {} on {}", doctor_id, date);

        let entries = match self.schedule.get_available_time_slots(doctor_id, date).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Schedule lookup failed for doctor {} on {}: {}", doctor_id, date, e);
                return Self::template();
            }
        };

        let slots = convert_entries(&entries);
        if slots.is_empty() {
            debug!("No schedule for doctor {} on {}, offering default slots", doctor_id, date);
            return Self::template();
        }

        info!("Resolved {} scheduled slots for doctor {} on {}", slots.len(), doctor_id, date);
        SlotResolution {
            slots,
            source: SlotSource::Schedule,
        }
    }

    fn template() -> SlotResolution {
        SlotResolution {
            slots: default_time_slots(),
            source: SlotSource::DefaultTemplate,
        }
    }
}

fn convert_entries(entries: &[ScheduleEntry]) -> Vec<TimeSlot> {
    entries
        .iter()
        .filter(|entry| entry.available)
        .filter_map(|entry| match to_display_time(&entry.time) {
            Some(display) => Some(TimeSlot(display)),
            None => {
                warn!("Dropping malformed schedule entry {:?}", entry.time);
                None
            }
        })
        .collect()
}

// ==============================================================================
// BOOKING SESSION
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SlotRefresh {
    Applied(Vec<TimeSlot>),
    /// A newer (doctor, date) selection started while this one was in flight.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedSlots {
    pub doctor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub slots: Vec<TimeSlot>,
}

/// Slot list for one booking session. Each `refresh` takes a ticket before it
/// awaits the schedule; only the holder of the latest ticket may publish.
pub struct SlotSession {
    resolver: SlotAvailabilityResolver,
    generation: AtomicU64,
    current: RwLock<Option<PublishedSlots>>,
}

impl SlotSession {
    pub fn new(resolver: SlotAvailabilityResolver) -> Self {
        Self {
            resolver,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    pub async fn refresh(&self, doctor_id: Option<&str>, date: Option<NaiveDate>) -> SlotRefresh {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let slots = self.resolver.resolve(doctor_id, date).await;

        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale slot list for {:?} on {:?}", doctor_id, date);
            return SlotRefresh::Superseded;
        }

        *current = Some(PublishedSlots {
            doctor_id: doctor_id.map(str::to_string),
            date,
            slots: slots.clone(),
        });

        SlotRefresh::Applied(slots)
    }

    pub async fn current(&self) -> Option<PublishedSlots> {
        self.current.read().await.clone()
    }

    /// Drops the published list and invalidates anything still in flight.
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.current.write().await = None;
    }
}
