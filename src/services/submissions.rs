//! Submissions service: public form intake, admin CRUD and bulk email
//! campaigns over the collected addresses.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        email::{
            Audience, AudienceSummary, AudiencesResponse, Campaign, Recipient, RecipientsResponse,
            ReplyEmail, ReplyReport, SendReport,
        },
        submission::{
            CreateBooking, CreateContact, NewsletterSignup, StatusResponse, SubmissionItem,
            SubmissionListResponse, SubmissionType, UpdateBooking, UpdateContact, UpdateNewsletter,
        },
    },
    repository::Repository,
    services::email::{
        self as email_templates, normalize_reply_body, EmailService,
    },
};

fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid id".to_string()))
}

#[derive(Clone)]
pub struct SubmissionsService {
    repository: Repository,
    email: EmailService,
}

impl SubmissionsService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    // ---- Public intake ----

    /// Newsletter signup. Duplicate addresses (case-insensitive) conflict;
    /// a welcome email goes out in the background when SMTP is configured.
    pub async fn subscribe_newsletter(&self, data: NewsletterSignup) -> AppResult<StatusResponse> {
        let email = data.email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::Validation("Email is required".to_string()));
        }
        if self.repository.submissions.newsletter_email_exists(&email).await? {
            return Err(AppError::Conflict(
                "This email is already subscribed.".to_string(),
            ));
        }
        self.repository.submissions.insert_newsletter(&email).await?;

        if self.email.is_configured() {
            let html = self
                .email
                .inject_unsubscribe(&email_templates::newsletter_welcome_html(), &email);
            self.email.queue_send(
                email,
                "Welcome to SyllaTech — You're In!".to_string(),
                html,
            );
        }

        Ok(StatusResponse::new("ok"))
    }

    /// Booking submission. A taken date/time slot conflicts; confirmation
    /// and owner-notification emails go out in the background.
    pub async fn submit_booking(&self, data: CreateBooking) -> AppResult<StatusResponse> {
        if let (Some(date_iso), Some(time)) = (&data.date_iso, &data.time) {
            if self
                .repository
                .submissions
                .booking_slot_taken(date_iso, time)
                .await?
            {
                return Err(AppError::Conflict(
                    "This time slot is no longer available. Please choose another.".to_string(),
                ));
            }
        }
        self.repository.submissions.insert_booking(&data).await?;

        if self.email.is_configured() {
            let date_display = data
                .date
                .clone()
                .or_else(|| data.date_iso.clone())
                .unwrap_or_default();
            let time_display = data.time.clone().unwrap_or_default();

            self.email.queue_send(
                data.email.clone(),
                "Your SyllaTech consultation is confirmed".to_string(),
                email_templates::booking_confirmation_html(&data.name, &date_display, &time_display),
            );

            let owner_html = email_templates::owner_booking_notification_html(
                &data.name,
                &data.email,
                &date_display,
                &time_display,
                data.phone.as_deref().unwrap_or(""),
                data.business.as_deref().unwrap_or(""),
                data.message.as_deref().unwrap_or(""),
            );
            self.email.queue_send(
                self.email.owner_email(),
                format!("New booking: {} — {} at {}", data.name, date_display, time_display),
                owner_html,
            );
        }

        Ok(StatusResponse::new("ok"))
    }

    pub async fn submit_contact(&self, data: CreateContact) -> AppResult<StatusResponse> {
        self.repository.submissions.insert_contact(&data).await?;
        Ok(StatusResponse::new("ok"))
    }

    /// Add an address to the unsubscribe list. Idempotent.
    pub async fn unsubscribe(&self, email: &str) -> AppResult<StatusResponse> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation("Invalid email".to_string()));
        }
        self.repository.submissions.insert_unsubscribed(&email).await?;
        Ok(StatusResponse::new("unsubscribed"))
    }

    // ---- Admin CRUD ----

    pub async fn list(&self, kind: SubmissionType) -> AppResult<SubmissionListResponse> {
        let items = match kind {
            SubmissionType::Newsletter => self
                .repository
                .submissions
                .list_newsletter()
                .await?
                .into_iter()
                .map(SubmissionItem::Newsletter)
                .collect(),
            SubmissionType::Bookings => self
                .repository
                .submissions
                .list_bookings()
                .await?
                .into_iter()
                .map(SubmissionItem::Booking)
                .collect(),
            SubmissionType::Contact => self
                .repository
                .submissions
                .list_contact()
                .await?
                .into_iter()
                .map(SubmissionItem::Contact)
                .collect(),
            SubmissionType::Unsubscribed => self
                .repository
                .submissions
                .list_unsubscribed()
                .await?
                .into_iter()
                .map(SubmissionItem::Unsubscribed)
                .collect(),
        };
        Ok(SubmissionListResponse { items })
    }

    pub async fn update_newsletter(
        &self,
        id: &str,
        data: UpdateNewsletter,
    ) -> AppResult<StatusResponse> {
        let id = parse_id(id)?;
        self.repository
            .submissions
            .update_newsletter(id, &data.email)
            .await?;
        Ok(StatusResponse::new("updated"))
    }

    /// Partial booking edit: absent fields keep their stored values, and
    /// the merged row must still carry a name and an email.
    pub async fn update_booking(&self, id: &str, data: UpdateBooking) -> AppResult<StatusResponse> {
        let id = parse_id(id)?;
        let mut merged = self.repository.submissions.get_booking(id).await?;
        if let Some(date) = data.date {
            merged.date = Some(date);
        }
        if let Some(date_iso) = data.date_iso {
            merged.date_iso = Some(date_iso);
        }
        if let Some(time) = data.time {
            merged.time = Some(time);
        }
        if let Some(name) = data.name {
            merged.name = name;
        }
        if let Some(email) = data.email {
            merged.email = email;
        }
        if let Some(phone) = data.phone {
            merged.phone = Some(phone);
        }
        if let Some(business) = data.business {
            merged.business = Some(business);
        }
        if let Some(message) = data.message {
            merged.message = Some(message);
        }
        if merged.name.trim().is_empty() || merged.email.trim().is_empty() {
            return Err(AppError::Validation(
                "Name and email are required".to_string(),
            ));
        }
        self.repository.submissions.update_booking(id, &merged).await?;
        Ok(StatusResponse::new("updated"))
    }

    pub async fn update_contact(&self, id: &str, data: UpdateContact) -> AppResult<StatusResponse> {
        let id = parse_id(id)?;
        let mut merged = self.repository.submissions.get_contact(id).await?;
        if let Some(name) = data.name {
            merged.name = name;
        }
        if let Some(email) = data.email {
            merged.email = email;
        }
        if let Some(business) = data.business {
            merged.business = Some(business);
        }
        if let Some(message) = data.message {
            merged.message = message;
        }
        if merged.name.trim().is_empty() || merged.email.trim().is_empty() {
            return Err(AppError::Validation(
                "Name and email are required".to_string(),
            ));
        }
        if merged.message.trim().is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }
        self.repository.submissions.update_contact(id, &merged).await?;
        Ok(StatusResponse::new("updated"))
    }

    /// Delete a submission. Unsubscribed rows are keyed by email, so a
    /// delete there re-subscribes the address.
    pub async fn delete(&self, kind: SubmissionType, id: &str) -> AppResult<StatusResponse> {
        match kind {
            SubmissionType::Newsletter => {
                self.repository.submissions.delete_newsletter(parse_id(id)?).await?
            }
            SubmissionType::Bookings => {
                self.repository.submissions.delete_booking(parse_id(id)?).await?
            }
            SubmissionType::Contact => {
                self.repository.submissions.delete_contact(parse_id(id)?).await?
            }
            SubmissionType::Unsubscribed => {
                self.repository.submissions.delete_unsubscribed(id).await?
            }
        }
        Ok(StatusResponse::new("deleted"))
    }

    // ---- CSV export rows ----
    //
    // Exports bypass the admin list cap: the dashboard pages through the
    // capped list views, the CSV carries the full history.

    pub async fn newsletter_rows(&self) -> AppResult<Vec<crate::models::submission::NewsletterItem>> {
        self.repository.submissions.export_newsletter().await
    }

    pub async fn booking_rows(&self) -> AppResult<Vec<crate::models::submission::BookingItem>> {
        self.repository.submissions.export_bookings().await
    }

    pub async fn contact_rows(&self) -> AppResult<Vec<crate::models::submission::ContactItem>> {
        self.repository.submissions.export_contact().await
    }

    // ---- Audiences and campaigns ----

    pub async fn audiences(&self) -> AppResult<AudiencesResponse> {
        let counts = self.repository.submissions.counts().await?;
        let all_count = self.repository.submissions.all_unique_emails().await?.len() as i64;
        let summary = |audience: Audience, count: i64| AudienceSummary {
            id: audience.id(),
            label: audience.label(),
            count,
        };
        Ok(AudiencesResponse {
            audiences: vec![
                summary(Audience::Newsletter, counts.newsletter),
                summary(Audience::Bookings, counts.bookings),
                summary(Audience::Contact, counts.contact),
                summary(Audience::All, all_count),
            ],
        })
    }

    /// Resolved recipients for an audience, unsubscribed addresses and
    /// blank emails filtered out.
    pub async fn recipients(&self, audience: Audience) -> AppResult<RecipientsResponse> {
        let unsubscribed = self.unsubscribed_set().await?;
        let raw = match audience {
            Audience::Newsletter => self.repository.submissions.newsletter_recipients().await?,
            Audience::Bookings => self.repository.submissions.booking_recipients().await?,
            Audience::Contact => self.repository.submissions.contact_recipients().await?,
            Audience::All => self
                .repository
                .submissions
                .all_unique_emails()
                .await?
                .into_iter()
                .map(|email| Recipient { email, name: None })
                .collect(),
        };
        let recipients = raw
            .into_iter()
            .filter(|r| {
                let email = r.email.trim();
                !email.is_empty() && !unsubscribed.contains(&email.to_lowercase())
            })
            .collect();
        Ok(RecipientsResponse { recipients })
    }

    /// Queue a campaign send. An explicit recipient selection must
    /// intersect the resolved audience.
    pub async fn send_campaign(&self, data: Campaign) -> AppResult<SendReport> {
        self.email.ensure_configured()?;

        let all_emails: Vec<String> = self
            .recipients(data.audience)
            .await?
            .recipients
            .into_iter()
            .map(|r| r.email)
            .collect();

        let recipients = match &data.recipients {
            Some(selection) => {
                let valid: HashSet<&str> = all_emails.iter().map(String::as_str).collect();
                let selected: Vec<String> = selection
                    .iter()
                    .map(|e| e.trim().to_string())
                    .filter(|e| valid.contains(e.as_str()))
                    .collect();
                if selected.is_empty() {
                    return Err(AppError::Validation(
                        "No valid recipients in selection".to_string(),
                    ));
                }
                selected
            }
            None => all_emails,
        };
        if recipients.is_empty() {
            return Err(AppError::Validation(
                "No recipients in selected audience".to_string(),
            ));
        }

        let count = recipients.len();
        tracing::info!(
            "Queueing {} campaign to {} recipient(s) in audience {}",
            data.email_type,
            count,
            data.audience.id()
        );
        self.email.queue_campaign(recipients, data.subject, data.html_body);

        Ok(SendReport {
            status: "sending".to_string(),
            recipients: count,
            message: format!("Email queued for {} recipient(s)", count),
        })
    }

    /// Queue a direct 1:1 reply. No unsubscribe link is injected.
    pub async fn send_reply(&self, data: ReplyEmail) -> AppResult<ReplyReport> {
        let to = data.to.trim().to_lowercase();
        if to.is_empty() || !to.contains('@') {
            return Err(AppError::Validation(
                "Invalid recipient email".to_string(),
            ));
        }
        self.email.ensure_configured()?;

        let subject = {
            let trimmed = data.subject.trim();
            if trimmed.is_empty() {
                "Message from SyllaTech".to_string()
            } else {
                trimmed.to_string()
            }
        };
        let html_body = normalize_reply_body(&data.html_body);
        self.email.queue_send(to.clone(), subject, html_body);

        Ok(ReplyReport {
            status: "sent".to_string(),
            to,
        })
    }

    async fn unsubscribed_set(&self) -> AppResult<HashSet<String>> {
        Ok(self
            .repository
            .submissions
            .unsubscribed_emails()
            .await?
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect())
    }
}
