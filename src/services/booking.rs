//! Booking service: slot configuration, per-date availability and the
//! calendar grid.

use chrono::Utc;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::booking::{AvailabilityResponse, SlotsConfig, UpdateSlotsConfig},
    repository::Repository,
    scheduling::{self, CalendarMonth},
};

#[derive(Clone)]
pub struct BookingService {
    repository: Repository,
}

impl BookingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Current slot configuration, falling back to defaults per key
    pub async fn slots_config(&self) -> AppResult<SlotsConfig> {
        let defaults = SlotsConfig::default();

        let time_slots = match self.repository.settings.get_config_value("time_slots").await? {
            Some(value) => serde_json::from_value(value).unwrap_or(defaults.time_slots),
            None => defaults.time_slots,
        };
        let blocked_dates = match self
            .repository
            .settings
            .get_config_value("blocked_dates")
            .await?
        {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Vec::new(),
        };
        let available_weekdays = match self
            .repository
            .settings
            .get_config_value("available_weekdays")
            .await?
        {
            Some(value) => serde_json::from_value(value).unwrap_or(defaults.available_weekdays),
            None => defaults.available_weekdays,
        };

        Ok(SlotsConfig {
            time_slots,
            blocked_dates,
            available_weekdays,
        })
    }

    /// Apply a partial configuration update. Weekday values outside 0-6
    /// are dropped rather than rejected.
    pub async fn update_config(&self, update: UpdateSlotsConfig) -> AppResult<SlotsConfig> {
        if let Some(time_slots) = update.time_slots {
            self.repository
                .settings
                .set_config_value("time_slots", &json!(time_slots))
                .await?;
        }
        if let Some(blocked_dates) = update.blocked_dates {
            self.repository
                .settings
                .set_config_value("blocked_dates", &json!(blocked_dates))
                .await?;
        }
        if let Some(weekdays) = update.available_weekdays {
            let weekdays: Vec<u8> = weekdays
                .into_iter()
                .filter(|d| (0..=6).contains(d))
                .map(|d| d as u8)
                .collect();
            self.repository
                .settings
                .set_config_value("available_weekdays", &json!(weekdays))
                .await?;
        }
        self.slots_config().await
    }

    /// Taken slot labels for a date. A blocked date reports every
    /// configured slot as taken so the widget renders nothing bookable.
    pub async fn availability(&self, date: &str) -> AppResult<AvailabilityResponse> {
        let config = self.slots_config().await?;
        if config.blocked_dates.iter().any(|d| d == date) {
            return Ok(AvailabilityResponse {
                taken: config.time_slots,
            });
        }
        let taken = self.repository.submissions.booked_times(date).await?;
        Ok(AvailabilityResponse { taken })
    }

    /// Calendar grid for a month under the current configuration
    pub async fn calendar(&self, year: i32, month: u32) -> AppResult<CalendarMonth> {
        let config = self.slots_config().await?;
        let today = Utc::now().date_naive();
        scheduling::month_grid(year, month, today, &config)
            .ok_or_else(|| AppError::Validation("Invalid year or month".to_string()))
    }
}
