//! Booking slot configuration and calendar models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Default slot labels offered when the admin has not configured any
pub const DEFAULT_TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM",
    "11:00 AM", "11:30 AM", "02:00 PM", "02:30 PM",
    "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

/// Default bookable weekdays: Monday through Friday (0 = Sunday)
pub const DEFAULT_AVAILABLE_WEEKDAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// Admin-editable booking configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlotsConfig {
    /// Bookable time-of-day labels (e.g. "09:00 AM")
    pub time_slots: Vec<String>,
    /// ISO dates (YYYY-MM-DD) with no availability at all
    pub blocked_dates: Vec<String>,
    /// Bookable weekdays, 0 = Sunday .. 6 = Saturday
    pub available_weekdays: Vec<u8>,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            time_slots: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
            blocked_dates: Vec::new(),
            available_weekdays: DEFAULT_AVAILABLE_WEEKDAYS.to_vec(),
        }
    }
}

/// Partial update of the booking configuration
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSlotsConfig {
    pub time_slots: Option<Vec<String>>,
    pub blocked_dates: Option<Vec<String>>,
    pub available_weekdays: Option<Vec<i32>>,
}

/// Booking configuration as served to the public booking widget.
///
/// The widget predates the admin config surface and consumes camelCase keys.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicBookingConfig {
    pub time_slots: Vec<String>,
    pub blocked_dates: Vec<String>,
    pub available_weekdays: Vec<u8>,
}

impl From<SlotsConfig> for PublicBookingConfig {
    fn from(config: SlotsConfig) -> Self {
        Self {
            time_slots: config.time_slots,
            blocked_dates: config.blocked_dates,
            available_weekdays: config.available_weekdays,
        }
    }
}

/// Query parameters for slot availability
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Date to check (YYYY-MM-DD)
    pub date: String,
}

/// Taken slots for a date
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub taken: Vec<String>,
}

/// Query parameters for the booking calendar grid
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    pub year: i32,
    /// Month 1-12
    pub month: u32,
}
