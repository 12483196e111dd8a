//! Admin settings endpoints

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::submission::StatusResponse, AppState};

use super::AdminKey;

/// Admin secret rotation request
#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change the admin secret
#[utoipa::path(
    put,
    path = "/admin/password",
    tag = "admin",
    security(("api_key" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Secret updated", body = StatusResponse),
        (status = 400, description = "Current password incorrect or new one too short", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    _: AdminKey,
    Json(data): Json<ChangePasswordRequest>,
) -> AppResult<Json<StatusResponse>> {
    state
        .services
        .settings
        .change_password(&data.current_password, &data.new_password)
        .await?;
    Ok(Json(StatusResponse::new("updated")))
}
