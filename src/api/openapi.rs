//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, booking, email, export, health, notifications, settings, submissions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SyllaTech API",
        version = "1.0.0",
        description = "Marketing site backend: submissions, bookings, email campaigns and analytics",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "SyllaTech", email = "contact@syllatech.com")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        // Public submissions
        submissions::subscribe_newsletter,
        submissions::submit_booking,
        submissions::submit_contact,
        submissions::unsubscribe,
        submissions::unsubscribe_page,
        // Booking
        booking::get_public_config,
        booking::get_availability,
        booking::get_calendar,
        booking::get_admin_config,
        booking::update_admin_config,
        // Tracking
        analytics::track_visit,
        analytics::get_analytics,
        // Admin submissions
        submissions::list_submissions,
        submissions::update_newsletter,
        submissions::update_booking,
        submissions::update_contact,
        submissions::delete_newsletter,
        submissions::delete_booking,
        submissions::delete_contact,
        submissions::delete_unsubscribed,
        // Email
        email::get_audiences,
        email::get_recipients,
        email::send_campaign,
        email::send_reply,
        // Export
        export::export_newsletter,
        export::export_bookings,
        export::export_contact,
        // Notifications
        notifications::notifications_stream,
        // Settings
        settings::change_password,
    ),
    components(
        schemas(
            // Submissions
            crate::models::submission::SubmissionType,
            crate::models::submission::NewsletterItem,
            crate::models::submission::BookingItem,
            crate::models::submission::ContactItem,
            crate::models::submission::UnsubscribedItem,
            crate::models::submission::SubmissionItem,
            crate::models::submission::SubmissionListResponse,
            crate::models::submission::NewsletterSignup,
            crate::models::submission::CreateBooking,
            crate::models::submission::CreateContact,
            crate::models::submission::UnsubscribeRequest,
            crate::models::submission::UpdateNewsletter,
            crate::models::submission::UpdateBooking,
            crate::models::submission::UpdateContact,
            crate::models::submission::StatusResponse,
            // Booking
            crate::models::booking::SlotsConfig,
            crate::models::booking::UpdateSlotsConfig,
            crate::models::booking::PublicBookingConfig,
            crate::models::booking::AvailabilityResponse,
            crate::scheduling::CalendarMonth,
            crate::scheduling::DayCell,
            // Tracking
            crate::models::visit::TrackVisit,
            crate::models::visit::CountryCount,
            crate::models::visit::RegionCount,
            crate::models::visit::DateCount,
            crate::models::visit::RecentVisit,
            crate::models::visit::AnalyticsResponse,
            // Email
            crate::models::email::Audience,
            crate::models::email::AudienceSummary,
            crate::models::email::AudiencesResponse,
            crate::models::email::Recipient,
            crate::models::email::RecipientsResponse,
            crate::models::email::Campaign,
            crate::models::email::ReplyEmail,
            crate::models::email::SendReport,
            crate::models::email::ReplyReport,
            // Notifications
            crate::services::notifications::NotificationKind,
            crate::services::notifications::NotificationEvent,
            // Settings
            settings::ChangePasswordRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "submissions", description = "Public form submissions"),
        (name = "booking", description = "Booking configuration and availability"),
        (name = "analytics", description = "Visit tracking"),
        (name = "admin", description = "Admin back-office endpoints")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
