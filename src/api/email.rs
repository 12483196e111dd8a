//! Bulk and transactional email endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::email::{
        AudiencesResponse, Campaign, RecipientsQuery, RecipientsResponse, ReplyEmail, ReplyReport,
        SendReport,
    },
    AppState,
};

use super::AdminKey;

/// Available audiences with live recipient counts
#[utoipa::path(
    get,
    path = "/admin/email/audiences",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Audience summaries", body = AudiencesResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_audiences(
    State(state): State<AppState>,
    _: AdminKey,
) -> AppResult<Json<AudiencesResponse>> {
    Ok(Json(state.services.submissions.audiences().await?))
}

/// Resolved recipients for an audience, unsubscribed addresses excluded
#[utoipa::path(
    get,
    path = "/admin/email/recipients",
    tag = "admin",
    security(("api_key" = [])),
    params(RecipientsQuery),
    responses(
        (status = 200, description = "Recipient list", body = RecipientsResponse)
    )
)]
pub async fn get_recipients(
    State(state): State<AppState>,
    _: AdminKey,
    Query(query): Query<RecipientsQuery>,
) -> AppResult<Json<RecipientsResponse>> {
    Ok(Json(state.services.submissions.recipients(query.audience).await?))
}

/// Queue a bulk campaign to an audience
#[utoipa::path(
    post,
    path = "/admin/email/send",
    tag = "admin",
    security(("api_key" = [])),
    request_body = Campaign,
    responses(
        (status = 200, description = "Campaign queued", body = SendReport),
        (status = 400, description = "No recipients", body = crate::error::ErrorResponse),
        (status = 503, description = "Email not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn send_campaign(
    State(state): State<AppState>,
    _: AdminKey,
    Json(data): Json<Campaign>,
) -> AppResult<Json<SendReport>> {
    Ok(Json(state.services.submissions.send_campaign(data).await?))
}

/// Queue a direct reply to one address
#[utoipa::path(
    post,
    path = "/admin/email/reply",
    tag = "admin",
    security(("api_key" = [])),
    request_body = ReplyEmail,
    responses(
        (status = 200, description = "Reply queued", body = ReplyReport),
        (status = 400, description = "Invalid recipient email", body = crate::error::ErrorResponse),
        (status = 503, description = "Email not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn send_reply(
    State(state): State<AppState>,
    _: AdminKey,
    Json(data): Json<ReplyEmail>,
) -> AppResult<Json<ReplyReport>> {
    Ok(Json(state.services.submissions.send_reply(data).await?))
}
