//! Visit tracking and analytics endpoints

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        submission::StatusResponse,
        visit::{AnalyticsResponse, TrackVisit},
    },
    AppState,
};

use super::AdminKey;

/// Client IP: first entry of `x-forwarded-for` when present (the server
/// usually sits behind a proxy), peer address otherwise.
fn client_ip(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// Record a page visit
#[utoipa::path(
    post,
    path = "/track",
    tag = "analytics",
    request_body = TrackVisit,
    responses(
        (status = 200, description = "Visit accepted", body = StatusResponse)
    )
)]
pub async fn track_visit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(data): Json<TrackVisit>,
) -> Json<StatusResponse> {
    let ip = client_ip(&headers, &addr);
    state.services.analytics.track(ip, data.path);
    Json(StatusResponse::new("ok"))
}

/// Visit statistics for the admin dashboard
#[utoipa::path(
    get,
    path = "/admin/analytics",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Aggregated analytics", body = AnalyticsResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    _: AdminKey,
) -> AppResult<Json<AnalyticsResponse>> {
    Ok(Json(state.services.analytics.snapshot().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "203.0.113.9:443".parse().unwrap()
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, &addr()), "198.51.100.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        assert_eq!(client_ip(&HeaderMap::new(), &addr()), "203.0.113.9");
    }
}
