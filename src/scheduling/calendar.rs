//! Calendar grid generation for the booking widget.
//!
//! Maps a (year, month) pair to a Sunday-first 7-column display grid:
//! leading blanks for the weekday offset of the 1st, then one cell per
//! day. Disablement is config-driven: past days, weekdays the admin has
//! not opened, and explicitly blocked dates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::booking::SlotsConfig;

/// One selectable day in the booking calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayCell {
    /// Day of month, 1-based
    pub day: u32,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub disabled: bool,
}

/// A month rendered as a Sunday-first grid
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarMonth {
    pub year: i32,
    /// Month 1-12
    pub month: u32,
    /// Leading `null`s for the weekday offset, then one cell per day
    pub days: Vec<Option<DayCell>>,
}

/// Number of days in a month, or `None` for an invalid month
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next_month.signed_duration_since(first).num_days() as u32)
}

/// Whether a day cannot be booked: strictly before today, on a weekday
/// outside the configured availability, or on a blocked date.
pub fn is_day_disabled(date: NaiveDate, today: NaiveDate, config: &SlotsConfig) -> bool {
    if date < today {
        return true;
    }
    let weekday = date.weekday().num_days_from_sunday() as u8;
    if !config.available_weekdays.contains(&weekday) {
        return true;
    }
    config
        .blocked_dates
        .iter()
        .any(|blocked| blocked == &date.format("%Y-%m-%d").to_string())
}

/// Build the display grid for a month.
///
/// Returns `None` when the month is out of range.
pub fn month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    config: &SlotsConfig,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day_count = days_in_month(year, month)?;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut days: Vec<Option<DayCell>> = Vec::with_capacity(leading + day_count as usize);
    for _ in 0..leading {
        days.push(None);
    }
    for day in 1..=day_count {
        // Safe: day is within the month by construction
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        days.push(Some(DayCell {
            day,
            date: date.format("%Y-%m-%d").to_string(),
            disabled: is_day_disabled(date, today, config),
        }));
    }

    Some(CalendarMonth { year, month, days })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_month() {
        assert!(month_grid(2025, 13, date(2025, 1, 1), &SlotsConfig::default()).is_none());
        assert!(month_grid(2025, 0, date(2025, 1, 1), &SlotsConfig::default()).is_none());
    }

    #[test]
    fn test_cell_count_matches_days_in_month() {
        let config = SlotsConfig::default();
        let today = date(2020, 1, 1);
        for (year, month, expected) in [
            (2025, 1, 31),
            (2025, 2, 28),
            (2024, 2, 29), // leap year
            (2025, 4, 30),
            (2025, 12, 31),
        ] {
            let grid = month_grid(year, month, today, &config).unwrap();
            let non_null = grid.days.iter().filter(|c| c.is_some()).count();
            assert_eq!(non_null, expected, "{}-{}", year, month);
        }
    }

    #[test]
    fn test_leading_blanks_plus_days_fill_the_grid() {
        let config = SlotsConfig::default();
        for month in 1..=12 {
            let grid = month_grid(2025, month, date(2020, 1, 1), &config).unwrap();
            let offset = date(2025, month, 1).weekday().num_days_from_sunday() as usize;
            let leading = grid.days.iter().take_while(|c| c.is_none()).count();
            assert_eq!(leading, offset, "2025-{:02} offset", month);
            // No trailing blanks: the blanks plus the day cells are the
            // whole grid, so each cell's column is its weekday.
            let day_count = grid.days.iter().filter(|c| c.is_some()).count();
            assert_eq!(leading + day_count, grid.days.len(), "2025-{:02}", month);
        }
    }

    #[test]
    fn test_leading_blanks_match_first_weekday() {
        // March 2025 starts on a Saturday (offset 6 from Sunday)
        let grid = month_grid(2025, 3, date(2020, 1, 1), &SlotsConfig::default()).unwrap();
        let leading = grid.days.iter().take_while(|c| c.is_none()).count();
        assert_eq!(leading, 6);
        assert_eq!(grid.days[6].as_ref().unwrap().day, 1);
    }

    #[test]
    fn test_past_days_disabled() {
        let config = SlotsConfig::default();
        let today = date(2025, 6, 18); // a Wednesday
        let grid = month_grid(2025, 6, today, &config).unwrap();
        for cell in grid.days.iter().flatten() {
            if cell.day < 18 {
                assert!(cell.disabled, "June {} should be disabled", cell.day);
            }
        }
        // Today itself is bookable
        let today_cell = grid.days.iter().flatten().find(|c| c.day == 18).unwrap();
        assert!(!today_cell.disabled);
    }

    #[test]
    fn test_weekends_disabled_with_default_config() {
        let config = SlotsConfig::default();
        // A far-future month so nothing is past
        let grid = month_grid(2030, 6, date(2025, 1, 1), &config).unwrap();
        for (idx, cell) in grid.days.iter().enumerate() {
            if let Some(cell) = cell {
                let column = idx % 7; // Sunday-first
                if column == 0 || column == 6 {
                    assert!(cell.disabled, "weekend day {} enabled", cell.day);
                } else {
                    assert!(!cell.disabled, "weekday {} disabled", cell.day);
                }
            }
        }
    }

    #[test]
    fn test_blocked_date_disabled() {
        let mut config = SlotsConfig::default();
        config.blocked_dates.push("2030-06-12".to_string()); // a Wednesday
        let grid = month_grid(2030, 6, date(2025, 1, 1), &config).unwrap();
        let cell = grid.days.iter().flatten().find(|c| c.day == 12).unwrap();
        assert!(cell.disabled);
    }

    #[test]
    fn test_custom_weekday_config() {
        // Admin opens Saturdays only
        let config = SlotsConfig {
            available_weekdays: vec![6],
            ..SlotsConfig::default()
        };
        assert!(!is_day_disabled(date(2030, 6, 1), date(2025, 1, 1), &config)); // Saturday
        assert!(is_day_disabled(date(2030, 6, 3), date(2025, 1, 1), &config)); // Monday
    }
}
