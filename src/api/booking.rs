//! Booking configuration, availability and calendar endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        booking::{
            AvailabilityQuery, AvailabilityResponse, CalendarQuery, PublicBookingConfig,
            SlotsConfig, UpdateSlotsConfig,
        },
        submission::StatusResponse,
    },
    scheduling::CalendarMonth,
    AppState,
};

use super::AdminKey;

/// Booking rules for the public booking widget
#[utoipa::path(
    get,
    path = "/booking/config",
    tag = "booking",
    responses(
        (status = 200, description = "Slot configuration", body = PublicBookingConfig)
    )
)]
pub async fn get_public_config(
    State(state): State<AppState>,
) -> AppResult<Json<PublicBookingConfig>> {
    let config = state.services.booking.slots_config().await?;
    Ok(Json(config.into()))
}

/// Taken time slots for a date
#[utoipa::path(
    get,
    path = "/availability",
    tag = "booking",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Taken slot labels", body = AvailabilityResponse)
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    Ok(Json(state.services.booking.availability(&query.date).await?))
}

/// Month grid for the booking calendar
#[utoipa::path(
    get,
    path = "/booking/calendar",
    tag = "booking",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Calendar grid", body = CalendarMonth),
        (status = 400, description = "Invalid year or month", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarMonth>> {
    Ok(Json(state.services.booking.calendar(query.year, query.month).await?))
}

/// Full booking configuration
#[utoipa::path(
    get,
    path = "/admin/booking/config",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Slot configuration", body = SlotsConfig),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_admin_config(
    State(state): State<AppState>,
    _: AdminKey,
) -> AppResult<Json<SlotsConfig>> {
    Ok(Json(state.services.booking.slots_config().await?))
}

/// Update booking configuration
#[utoipa::path(
    put,
    path = "/admin/booking/config",
    tag = "admin",
    security(("api_key" = [])),
    request_body = UpdateSlotsConfig,
    responses(
        (status = 200, description = "Updated", body = StatusResponse)
    )
)]
pub async fn update_admin_config(
    State(state): State<AppState>,
    _: AdminKey,
    Json(data): Json<UpdateSlotsConfig>,
) -> AppResult<Json<StatusResponse>> {
    state.services.booking.update_config(data).await?;
    Ok(Json(StatusResponse::new("updated")))
}
