//! Visit tracking and analytics aggregation.
//!
//! Tracking is fire-and-forget: the handler returns as soon as the visit
//! is accepted, and the geolocation lookup plus row insert run in a
//! background task so a slow geo API never delays page loads.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    config::TrackingConfig,
    error::AppResult,
    models::visit::{AnalyticsResponse, GeoLocation},
    repository::Repository,
};

/// Paths longer than this are truncated before storage
const MAX_PATH_LEN: usize = 500;

#[derive(Debug, Deserialize)]
struct GeoApiResponse {
    status: String,
    country: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    city: Option<String>,
}

fn is_local_ip(ip: &str) -> bool {
    if matches!(ip, "127.0.0.1" | "::1" | "localhost")
        || ip.starts_with("192.168.")
        || ip.starts_with("10.")
    {
        return true;
    }
    // 172.16.0.0/12: only second octets 16 through 31 are private
    ip.strip_prefix("172.")
        .and_then(|rest| rest.split('.').next())
        .and_then(|octet| octet.parse::<u8>().ok())
        .is_some_and(|octet| (16..=31).contains(&octet))
}

fn normalize_path(path: Option<String>) -> String {
    let path = path.unwrap_or_default();
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    trimmed.chars().take(MAX_PATH_LEN).collect()
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
    http: reqwest::Client,
    config: TrackingConfig,
}

impl AnalyticsService {
    pub fn new(repository: Repository, config: TrackingConfig) -> Self {
        Self {
            repository,
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Record a page visit for the given client IP. Returns immediately;
    /// geolocation and the insert happen in the background.
    pub fn track(&self, ip: String, path: Option<String>) {
        let path = normalize_path(path);
        let service = self.clone();
        tokio::spawn(async move {
            let geo = service.locate(&ip).await;
            if let Err(e) = service
                .repository
                .visits
                .insert(&path, &geo.country, geo.region.as_deref(), geo.city.as_deref())
                .await
            {
                tracing::warn!("Failed to record visit: {}", e);
            }
        });
    }

    /// Resolve an IP to a location. Private and loopback addresses skip
    /// the lookup; any API failure degrades to "Unknown".
    async fn locate(&self, ip: &str) -> GeoLocation {
        if ip.is_empty() || is_local_ip(ip) {
            return GeoLocation::local();
        }

        let url = format!(
            "{}/{}?fields=status,country,regionName,city",
            self.config.geo_api_url.trim_end_matches('/'),
            ip
        );
        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(self.config.geo_timeout_secs))
            .send()
            .await;

        match response {
            Ok(response) => match response.json::<GeoApiResponse>().await {
                Ok(geo) if geo.status == "success" => GeoLocation {
                    country: geo.country.unwrap_or_else(|| "Unknown".to_string()),
                    region: geo.region_name,
                    city: geo.city,
                },
                Ok(_) => GeoLocation::unknown(),
                Err(e) => {
                    tracing::debug!("Geo lookup returned invalid body for {}: {}", ip, e);
                    GeoLocation::unknown()
                }
            },
            Err(e) => {
                tracing::debug!("Geo lookup failed for {}: {}", ip, e);
                GeoLocation::unknown()
            }
        }
    }

    /// Dashboard aggregate: totals, top locations, a 14-day daily series
    /// and the 20 most recent visits.
    pub async fn snapshot(&self) -> AppResult<AnalyticsResponse> {
        let today = chrono::Utc::now().date_naive();
        let total_visits = self.repository.visits.total().await?;
        let visits_today = self.repository.visits.count_on(today).await?;
        let by_country = self.repository.visits.by_country(15).await?;
        let by_region = self.repository.visits.by_region(15).await?;
        let visits_by_date = self.repository.visits.by_date(14).await?;
        let recent = self.repository.visits.recent(20).await?;

        Ok(AnalyticsResponse {
            total_visits,
            visits_today,
            by_country,
            by_region,
            visits_by_date,
            recent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ips() {
        assert!(is_local_ip("127.0.0.1"));
        assert!(is_local_ip("::1"));
        assert!(is_local_ip("192.168.1.40"));
        assert!(is_local_ip("10.0.0.2"));
        assert!(!is_local_ip("8.8.8.8"));
    }

    #[test]
    fn test_172_private_range_is_twelve_bits() {
        assert!(is_local_ip("172.16.0.1"));
        assert!(is_local_ip("172.31.255.254"));
        // Public 172.x addresses outside /12 still get geolocated
        assert!(!is_local_ip("172.15.0.1"));
        assert!(!is_local_ip("172.32.0.1"));
        assert!(!is_local_ip("172.67.10.4"));
    }

    #[test]
    fn test_normalize_path_defaults_to_root() {
        assert_eq!(normalize_path(None), "/");
        assert_eq!(normalize_path(Some("   ".to_string())), "/");
        assert_eq!(normalize_path(Some(" /pricing ".to_string())), "/pricing");
    }

    #[test]
    fn test_normalize_path_truncates() {
        let long = "a".repeat(2 * MAX_PATH_LEN);
        assert_eq!(normalize_path(Some(long)).len(), MAX_PATH_LEN);
    }
}
