pub mod hasher;
pub mod profiles;
pub mod triage;
pub mod booking;

pub use hasher::{hash_token, appointment_code, TBD_SENTINEL};
pub use profiles::REASON_PROFILES;
pub use triage::ReasonClassifier;
pub use booking::{AppointmentStore, BookingService, SupabaseAppointmentStore};
