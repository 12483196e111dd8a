//! Liveness endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of `GET /health`
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" when the server answers at all
    pub status: String,
    /// Crate version serving the request
    pub version: String,
}

/// Liveness probe; answers without touching the database
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
