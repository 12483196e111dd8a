//! API handlers for SyllaTech REST endpoints

pub mod analytics;
pub mod booking;
pub mod email;
pub mod export;
pub mod health;
pub mod notifications;
pub mod openapi;
pub mod settings;
pub mod submissions;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Header carrying the admin shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Extractor guarding admin endpoints with the shared secret
pub struct AdminKey;

#[async_trait]
impl FromRequestParts<AppState> for AdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))?;

        state.services.settings.verify_key(key).await?;

        Ok(AdminKey)
    }
}
