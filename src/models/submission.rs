//! Form submission models (newsletter, bookings, contact, unsubscribes)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// The four admin submission collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Newsletter,
    Bookings,
    Contact,
    Unsubscribed,
}

impl SubmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::Newsletter => "newsletter",
            SubmissionType::Bookings => "bookings",
            SubmissionType::Contact => "contact",
            SubmissionType::Unsubscribed => "unsubscribed",
        }
    }
}

/// Newsletter subscriber record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NewsletterItem {
    pub id: Uuid,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

/// Consultation booking record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingItem {
    pub id: Uuid,
    /// Human-readable date as shown in the wizard (e.g. "Friday, March 7, 2025")
    pub date: Option<String>,
    /// ISO date (YYYY-MM-DD) used for availability queries
    pub date_iso: Option<String>,
    /// Slot label (e.g. "09:00 AM")
    pub time: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business: Option<String>,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Contact form record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContactItem {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub business: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Unsubscribed email record.
///
/// The table is keyed by email; list responses alias the email as `id` so the
/// admin list view can treat every collection uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UnsubscribedItem {
    pub id: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

/// One row of an admin submissions listing
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SubmissionItem {
    Newsletter(NewsletterItem),
    Booking(BookingItem),
    Contact(ContactItem),
    Unsubscribed(UnsubscribedItem),
}

/// Admin submissions listing envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionItem>,
}

/// Public newsletter signup request
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewsletterSignup {
    pub email: String,
}

/// Public booking submission request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub date: Option<String>,
    pub date_iso: Option<String>,
    pub time: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business: Option<String>,
    pub message: Option<String>,
}

/// Public contact form request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub business: Option<String>,
    pub message: String,
}

/// Public unsubscribe request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// Admin edit of a newsletter subscriber
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNewsletter {
    pub email: String,
}

/// Admin edit of a booking (partial field map)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBooking {
    pub date: Option<String>,
    pub date_iso: Option<String>,
    pub time: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business: Option<String>,
    pub message: Option<String>,
}

/// Admin edit of a contact submission (partial field map)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub business: Option<String>,
    pub message: Option<String>,
}

/// Generic status envelope for mutations (`ok`, `updated`, `deleted`, ...)
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}
