//! Form submission endpoints: public intake and admin CRUD

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::submission::{
        CreateBooking, CreateContact, NewsletterSignup, StatusResponse, SubmissionListResponse,
        SubmissionType, UnsubscribeRequest, UpdateBooking, UpdateContact, UpdateNewsletter,
    },
    AppState,
};

use super::AdminKey;

/// Newsletter signup
#[utoipa::path(
    post,
    path = "/submissions/newsletter",
    tag = "submissions",
    request_body = NewsletterSignup,
    responses(
        (status = 200, description = "Subscribed", body = StatusResponse),
        (status = 400, description = "Email is required", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already subscribed", body = crate::error::ErrorResponse)
    )
)]
pub async fn subscribe_newsletter(
    State(state): State<AppState>,
    Json(data): Json<NewsletterSignup>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.subscribe_newsletter(data).await?))
}

/// Book a consultation slot
#[utoipa::path(
    post,
    path = "/submissions/bookings",
    tag = "submissions",
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Booking recorded", body = StatusResponse),
        (status = 409, description = "Slot already taken", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(data): Json<CreateBooking>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.submit_booking(data).await?))
}

/// Contact form submission
#[utoipa::path(
    post,
    path = "/submissions/contact",
    tag = "submissions",
    request_body = CreateContact,
    responses(
        (status = 200, description = "Message recorded", body = StatusResponse)
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(data): Json<CreateContact>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.submit_contact(data).await?))
}

/// Unsubscribe an email address
#[utoipa::path(
    post,
    path = "/unsubscribe",
    tag = "submissions",
    request_body = UnsubscribeRequest,
    responses(
        (status = 200, description = "Unsubscribed", body = StatusResponse),
        (status = 400, description = "Invalid email", body = crate::error::ErrorResponse)
    )
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(data): Json<UnsubscribeRequest>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.unsubscribe(&data.email).await?))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UnsubscribeQuery {
    pub email: String,
}

const UNSUBSCRIBE_DONE_PAGE: &str = "<html><body style='font-family:sans-serif;max-width:480px;margin:80px auto;text-align:center;background:#030712;color:#e2e8f0;padding:40px;'><h2 style='color:#22d3ee;'>You're unsubscribed</h2><p>You won't receive marketing emails from us anymore.</p></body></html>";

const UNSUBSCRIBE_INVALID_PAGE: &str = "<html><body style='font-family:sans-serif;max-width:480px;margin:80px auto;text-align:center;'><h2>Invalid request</h2><p>Please use the unsubscribe link from your email.</p></body></html>";

/// One-click unsubscribe from an email link. This is a landing page, so
/// even the error case renders HTML, never a JSON body.
#[utoipa::path(
    get,
    path = "/unsubscribe",
    tag = "submissions",
    params(UnsubscribeQuery),
    responses(
        (status = 200, description = "Confirmation page", content_type = "text/html"),
        (status = 400, description = "Invalid request page", content_type = "text/html")
    )
)]
pub async fn unsubscribe_page(
    State(state): State<AppState>,
    Query(query): Query<UnsubscribeQuery>,
) -> Response {
    let email = query.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return (StatusCode::BAD_REQUEST, Html(UNSUBSCRIBE_INVALID_PAGE)).into_response();
    }
    match state.services.submissions.unsubscribe(&email).await {
        Ok(_) => Html(UNSUBSCRIBE_DONE_PAGE).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Collection to list
    #[serde(rename = "type")]
    pub kind: SubmissionType,
}

/// List a submission collection
#[utoipa::path(
    get,
    path = "/admin/submissions",
    tag = "admin",
    security(("api_key" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Submission items", body = SubmissionListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    _: AdminKey,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<SubmissionListResponse>> {
    Ok(Json(state.services.submissions.list(query.kind).await?))
}

/// Edit a newsletter subscriber
#[utoipa::path(
    put,
    path = "/admin/submissions/newsletter/{id}",
    tag = "admin",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Subscriber ID")),
    request_body = UpdateNewsletter,
    responses(
        (status = 200, description = "Updated", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_newsletter(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
    Json(data): Json<UpdateNewsletter>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.update_newsletter(&id, data).await?))
}

/// Edit a booking
#[utoipa::path(
    put,
    path = "/admin/submissions/bookings/{id}",
    tag = "admin",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Updated", body = StatusResponse),
        (status = 400, description = "Name and email are required", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
    Json(data): Json<UpdateBooking>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.update_booking(&id, data).await?))
}

/// Edit a contact submission
#[utoipa::path(
    put,
    path = "/admin/submissions/contact/{id}",
    tag = "admin",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Submission ID")),
    request_body = UpdateContact,
    responses(
        (status = 200, description = "Updated", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
    Json(data): Json<UpdateContact>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(state.services.submissions.update_contact(&id, data).await?))
}

/// Delete a newsletter subscriber
#[utoipa::path(
    delete,
    path = "/admin/submissions/newsletter/{id}",
    tag = "admin",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Subscriber ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_newsletter(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(
        state
            .services
            .submissions
            .delete(SubmissionType::Newsletter, &id)
            .await?,
    ))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/admin/submissions/bookings/{id}",
    tag = "admin",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(
        state
            .services
            .submissions
            .delete(SubmissionType::Bookings, &id)
            .await?,
    ))
}

/// Delete a contact submission
#[utoipa::path(
    delete,
    path = "/admin/submissions/contact/{id}",
    tag = "admin",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(
        state
            .services
            .submissions
            .delete(SubmissionType::Contact, &id)
            .await?,
    ))
}

/// Remove an address from the unsubscribe list (re-subscribes it)
#[utoipa::path(
    delete,
    path = "/admin/submissions/unsubscribed/{email}",
    tag = "admin",
    security(("api_key" = [])),
    params(("email" = String, Path, description = "Unsubscribed email address")),
    responses(
        (status = 200, description = "Deleted", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_unsubscribed(
    State(state): State<AppState>,
    _: AdminKey,
    Path(email): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    Ok(Json(
        state
            .services
            .submissions
            .delete(SubmissionType::Unsubscribed, &email)
            .await?,
    ))
}
