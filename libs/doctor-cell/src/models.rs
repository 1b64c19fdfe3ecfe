use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ==============================================================================
// NUMERIC FIELDS
// ==============================================================================

/// A doctor field that the directory may hand us as a number or as free text
/// ("12", "12 years", "₹500"). Reads never fail; unparseable text counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexibleNumber {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for FlexibleNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            // null, booleans, arrays, objects
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => FlexibleNumber::Number(n),
            Raw::Text(text) => FlexibleNumber::Text(text),
            Raw::Other(_) => FlexibleNumber::default(),
        })
    }
}

impl Default for FlexibleNumber {
    fn default() -> Self {
        FlexibleNumber::Number(0.0)
    }
}

impl From<f64> for FlexibleNumber {
    fn from(value: f64) -> Self {
        FlexibleNumber::Number(value)
    }
}

impl From<&str> for FlexibleNumber {
    fn from(value: &str) -> Self {
        FlexibleNumber::Text(value.to_string())
    }
}

impl FlexibleNumber {
    /// Integer reading: leading sign and digits only, truncating toward zero.
    pub fn as_int(&self) -> i64 {
        match self {
            FlexibleNumber::Number(n) if n.is_finite() => n.trunc() as i64,
            FlexibleNumber::Number(_) => 0,
            FlexibleNumber::Text(text) => leading_int(text).unwrap_or(0),
        }
    }

    /// Decimal reading: leading decimal number, 0 when none is present.
    pub fn as_f64(&self) -> f64 {
        match self {
            FlexibleNumber::Number(n) if n.is_finite() => *n,
            FlexibleNumber::Number(_) => 0.0,
            FlexibleNumber::Text(text) => leading_float(text).unwrap_or(0.0),
        }
    }
}

fn numeric_prefix(text: &str, allow_fraction: bool) -> &str {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if allow_fraction && !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    &trimmed[..end]
}

fn leading_int(text: &str) -> Option<i64> {
    numeric_prefix(text, false).parse().ok()
}

fn leading_float(text: &str) -> Option<f64> {
    let prefix = numeric_prefix(text, true).trim_end_matches('.');
    prefix.parse::<f64>().ok().filter(|n| n.is_finite())
}

// ==============================================================================
// CONSULTATION TYPE
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    #[serde(alias = "virtual", alias = "online", alias = "remote", alias = "Video")]
    Video,
    #[serde(alias = "in_person", alias = "in-person", alias = "offline", alias = "Physical")]
    Physical,
}

impl ConsultationType {
    pub const ALL: [ConsultationType; 2] = [ConsultationType::Video, ConsultationType::Physical];
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationType::Video => write!(f, "video"),
            ConsultationType::Physical => write!(f, "physical"),
        }
    }
}

impl FromStr for ConsultationType {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" | "virtual" | "online" | "remote" => Ok(ConsultationType::Video),
            "physical" | "in_person" | "in-person" | "offline" => Ok(ConsultationType::Physical),
            other => Err(DoctorError::ValidationError(format!(
                "Unknown consultation mode: {}",
                other
            ))),
        }
    }
}

// ==============================================================================
// DOCTOR
// ==============================================================================

fn default_true() -> bool {
    true
}

/// Nullable columns come back as explicit `null`; treat them like absent keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    #[serde(default, alias = "full_name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        default,
        rename = "displayName",
        alias = "display_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    #[serde(default, alias = "specialty", deserialize_with = "null_as_default")]
    pub specialization: String,
    #[serde(default)]
    pub specializations: Option<Vec<String>>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "years_experience", alias = "experienceYears", deserialize_with = "null_as_default")]
    pub experience: FlexibleNumber,
    #[serde(default)]
    pub rating: Option<FlexibleNumber>,
    #[serde(default, alias = "averageRating")]
    pub average_rating: Option<FlexibleNumber>,
    #[serde(default, alias = "totalReviews", deserialize_with = "null_as_default")]
    pub total_reviews: FlexibleNumber,
    #[serde(default, alias = "totalAppointments", deserialize_with = "null_as_default")]
    pub total_appointments: FlexibleNumber,
    #[serde(default, alias = "consultationFee", deserialize_with = "null_as_default")]
    pub consultation_fee: FlexibleNumber,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "consultationModes")]
    pub consultation_modes: Option<Vec<String>>,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub available: bool,
}

impl Default for Doctor {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            display_name: None,
            specialization: String::new(),
            specializations: None,
            bio: None,
            experience: FlexibleNumber::default(),
            rating: None,
            average_rating: None,
            total_reviews: FlexibleNumber::default(),
            total_appointments: FlexibleNumber::default(),
            consultation_fee: FlexibleNumber::default(),
            location: None,
            city: None,
            state: None,
            gender: None,
            consultation_modes: None,
            available: true,
        }
    }
}

impl Doctor {
    /// `displayName` when set, otherwise `name`.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.name.as_str())
    }

    /// `average_rating`, then `rating`, then 0.
    pub fn effective_rating(&self) -> f64 {
        self.average_rating
            .as_ref()
            .or(self.rating.as_ref())
            .map(FlexibleNumber::as_f64)
            .unwrap_or(0.0)
    }

    pub fn experience_years(&self) -> i64 {
        self.experience.as_int()
    }

    pub fn fee(&self) -> f64 {
        self.consultation_fee.as_int() as f64
    }

    pub fn review_count(&self) -> i64 {
        self.total_reviews.as_int()
    }

    pub fn appointment_count(&self) -> f64 {
        self.total_appointments.as_f64().max(0.0)
    }

    /// Primary specialization followed by any additional ones.
    pub fn all_specializations(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.specialization.as_str()).chain(
            self.specializations
                .iter()
                .flatten()
                .map(String::as_str),
        )
    }

    /// Modes the doctor offers. A doctor without a declared list offers both.
    pub fn modes(&self) -> HashSet<ConsultationType> {
        match &self.consultation_modes {
            Some(modes) => modes
                .iter()
                .filter_map(|mode| mode.parse().ok())
                .collect(),
            None => ConsultationType::ALL.into_iter().collect(),
        }
    }

    pub fn location_fields(&self) -> impl Iterator<Item = &str> {
        [&self.location, &self.city, &self.state]
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}

// ==============================================================================
// FILTER CRITERIA
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceBucket {
    #[default]
    Any,
    UpToTwo,
    ThreeToFive,
    SixToTen,
    TenPlus,
}

impl ExperienceBucket {
    pub fn contains(&self, years: i64) -> bool {
        match self {
            ExperienceBucket::Any => true,
            ExperienceBucket::UpToTwo => years <= 2,
            ExperienceBucket::ThreeToFive => (3..=5).contains(&years),
            ExperienceBucket::SixToTen => (6..=10).contains(&years),
            ExperienceBucket::TenPlus => years >= 10,
        }
    }
}

impl FromStr for ExperienceBucket {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "0-2" => ExperienceBucket::UpToTwo,
            "3-5" => ExperienceBucket::ThreeToFive,
            "6-10" => ExperienceBucket::SixToTen,
            "10+" => ExperienceBucket::TenPlus,
            _ => ExperienceBucket::Any,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingBucket {
    #[default]
    Any,
    FourPlus,
    FourHalfPlus,
    Five,
}

impl RatingBucket {
    pub fn contains(&self, rating: f64) -> bool {
        match self {
            RatingBucket::Any => true,
            RatingBucket::FourPlus => rating >= 4.0,
            RatingBucket::FourHalfPlus => rating >= 4.5,
            RatingBucket::Five => rating == 5.0,
        }
    }
}

impl FromStr for RatingBucket {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "4+" => RatingBucket::FourPlus,
            "4.5+" => RatingBucket::FourHalfPlus,
            "5" => RatingBucket::Five,
            _ => RatingBucket::Any,
        })
    }
}

/// Inclusive fee range; `None` on either side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeeRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FeeRange {
    pub fn contains(&self, fee: f64) -> bool {
        self.min.map_or(true, |min| fee >= min) && self.max.map_or(true, |max| fee <= max)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub specialization: Option<String>,
    pub experience: ExperienceBucket,
    pub rating: RatingBucket,
    pub location: Option<String>,
    pub fee: FeeRange,
    pub gender: Option<String>,
    pub modes: HashSet<ConsultationType>,
}

// ==============================================================================
// RANKING
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    #[default]
    Best,
    Rating,
    Experience,
    Price,
    Availability,
}

impl FromStr for SortStrategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "rating" => SortStrategy::Rating,
            "experience" => SortStrategy::Experience,
            "price" => SortStrategy::Price,
            "availability" => SortStrategy::Availability,
            _ => SortStrategy::Best,
        })
    }
}

// ==============================================================================
// SCHEDULE / SLOTS
// ==============================================================================

/// One bookable start time as returned by the schedule collaborator (`HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub time: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub available: bool,
}

impl ScheduleEntry {
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            available: true,
        }
    }
}

/// Weekly schedule row for one weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSchedule {
    pub doctor_id: String,
    pub day: String,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    #[serde(alias = "slotDuration")]
    pub slot_duration: i64,
    #[serde(default = "default_true", alias = "isAvailable")]
    pub is_available: bool,
}

/// Display-ready slot (`"H:MM AM"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(pub String);

impl TimeSlot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    Schedule,
    DefaultTemplate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotResolution {
    pub slots: Vec<TimeSlot>,
    pub source: SlotSource,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Directory error: {0}")]
    DirectoryError(String),
}
