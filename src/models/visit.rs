//! Page visit tracking and analytics models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public visit tracking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackVisit {
    pub path: Option<String>,
}

/// Geolocation resolved for a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub country: String,
    pub region: Option<String>,
    pub city: Option<String>,
}

impl GeoLocation {
    pub fn local() -> Self {
        Self {
            country: "Local".to_string(),
            region: Some("Local".to_string()),
            city: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            country: "Unknown".to_string(),
            region: None,
            city: None,
        }
    }
}

/// Visits per country
#[derive(Debug, Serialize, ToSchema)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

/// Visits per country/region pair
#[derive(Debug, Serialize, ToSchema)]
pub struct RegionCount {
    pub country: String,
    pub region: String,
    pub count: i64,
}

/// Visits per calendar day
#[derive(Debug, Serialize, ToSchema)]
pub struct DateCount {
    /// Day (YYYY-MM-DD)
    pub date: String,
    pub count: i64,
}

/// One recent visit row
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentVisit {
    pub path: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Read-only analytics aggregate for the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub total_visits: i64,
    pub visits_today: i64,
    pub by_country: Vec<CountryCount>,
    pub by_region: Vec<RegionCount>,
    /// Daily visit counts for the last 14 days
    pub visits_by_date: Vec<DateCount>,
    /// Last 20 visits, newest first
    pub recent: Vec<RecentVisit>,
}
