//! Bulk and transactional email models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Server-defined recipient segments for bulk email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Newsletter,
    Bookings,
    Contact,
    All,
}

impl Audience {
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Newsletter => "Newsletter Subscribers",
            Audience::Bookings => "Past Bookings",
            Audience::Contact => "Contact Form Submissions",
            Audience::All => "All (Unique Emails)",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Audience::Newsletter => "newsletter",
            Audience::Bookings => "bookings",
            Audience::Contact => "contact",
            Audience::All => "all",
        }
    }
}

/// An audience with its live recipient count
#[derive(Debug, Serialize, ToSchema)]
pub struct AudienceSummary {
    pub id: &'static str,
    pub label: &'static str,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AudiencesResponse {
    pub audiences: Vec<AudienceSummary>,
}

/// A single campaign recipient
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Recipient {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipientsResponse {
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RecipientsQuery {
    pub audience: Audience,
}

/// Bulk email campaign request
#[derive(Debug, Deserialize, ToSchema)]
pub struct Campaign {
    pub audience: Audience,
    /// Free-form campaign category (offer, news, announcement, update)
    pub email_type: String,
    pub subject: String,
    pub html_body: String,
    /// Optional explicit selection; must be a subset of the audience
    pub recipients: Option<Vec<String>>,
}

/// Direct reply to one submission's email address
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplyEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Response after queueing a campaign
#[derive(Debug, Serialize, ToSchema)]
pub struct SendReport {
    pub status: String,
    pub recipients: usize,
    pub message: String,
}

/// Response after queueing a reply
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyReport {
    pub status: String,
    pub to: String,
}
