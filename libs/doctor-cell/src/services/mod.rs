pub mod doctor;
pub mod availability;
pub mod filtering;
pub mod ranking;
pub mod scheduling;

pub use doctor::{DoctorDirectory, DoctorSearchService, SupabaseDoctorDirectory};
pub use availability::{SlotAvailabilityResolver, SlotRefresh, SlotSession, DEFAULT_TIME_SLOTS};
pub use filtering::DoctorFacetFilter;
pub use ranking::DoctorRanker;
pub use scheduling::{ScheduleService, SupabaseScheduleService};
