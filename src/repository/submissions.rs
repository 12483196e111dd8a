//! Submissions repository: newsletter subscribers, bookings, contact
//! messages and the unsubscribe list.

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        email::Recipient,
        submission::{BookingItem, ContactItem, CreateBooking, CreateContact, NewsletterItem, UnsubscribedItem},
    },
    services::notifications::SubmissionCounts,
};

/// Admin list views are capped; older rows stay queryable via CSV export
const LIST_LIMIT: i64 = 1000;

fn non_blank(name: String) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Clone)]
pub struct SubmissionsRepository {
    pool: Pool<Postgres>,
}

impl SubmissionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Newsletter ----

    pub async fn list_newsletter(&self) -> AppResult<Vec<NewsletterItem>> {
        let rows = sqlx::query_as::<_, NewsletterItem>(
            "SELECT id, email, timestamp FROM newsletter_subscribers ORDER BY timestamp DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every subscriber row, uncapped, for CSV export
    pub async fn export_newsletter(&self) -> AppResult<Vec<NewsletterItem>> {
        let rows = sqlx::query_as::<_, NewsletterItem>(
            "SELECT id, email, timestamp FROM newsletter_subscribers ORDER BY timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Case-insensitive membership test for duplicate signups
    pub async fn newsletter_email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM newsletter_subscribers WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(exists.is_some())
    }

    pub async fn insert_newsletter(&self, email: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO newsletter_subscribers (email) VALUES ($1)")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_newsletter(&self, id: Uuid, email: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE newsletter_subscribers SET email = $1 WHERE id = $2")
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        Ok(())
    }

    pub async fn delete_newsletter(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        Ok(())
    }

    // ---- Bookings ----

    pub async fn list_bookings(&self) -> AppResult<Vec<BookingItem>> {
        let rows = sqlx::query_as::<_, BookingItem>(
            r#"
            SELECT id, date, date_iso, time, name, email, phone, business, message, timestamp
            FROM bookings ORDER BY timestamp DESC LIMIT $1
            "#,
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every booking row, uncapped, for CSV export
    pub async fn export_bookings(&self) -> AppResult<Vec<BookingItem>> {
        let rows = sqlx::query_as::<_, BookingItem>(
            r#"
            SELECT id, date, date_iso, time, name, email, phone, business, message, timestamp
            FROM bookings ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_booking(&self, id: Uuid) -> AppResult<BookingItem> {
        sqlx::query_as::<_, BookingItem>(
            r#"
            SELECT id, date, date_iso, time, name, email, phone, business, message, timestamp
            FROM bookings WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))
    }

    /// Whether a date/time slot already holds a booking
    pub async fn booking_slot_taken(&self, date_iso: &str, time: &str) -> AppResult<bool> {
        let exists: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM bookings WHERE date_iso = $1 AND time = $2")
                .bind(date_iso)
                .bind(time)
                .fetch_optional(&self.pool)
                .await?;
        Ok(exists.is_some())
    }

    /// Slot labels already taken on a date
    pub async fn booked_times(&self, date_iso: &str) -> AppResult<Vec<String>> {
        let rows: Vec<Option<String>> =
            sqlx::query_scalar("SELECT time FROM bookings WHERE date_iso = $1")
                .bind(date_iso)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().flatten().collect())
    }

    pub async fn insert_booking(&self, data: &CreateBooking) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (date, date_iso, time, name, email, phone, business, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&data.date)
        .bind(&data.date_iso)
        .bind(&data.time)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.business)
        .bind(&data.message)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Full-row update after the service has merged the partial field map
    pub async fn update_booking(&self, id: Uuid, merged: &BookingItem) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE bookings SET date = $1, date_iso = $2, time = $3, name = $4, email = $5,
                phone = $6, business = $7, message = $8 WHERE id = $9
            "#,
        )
        .bind(&merged.date)
        .bind(&merged.date_iso)
        .bind(&merged.time)
        .bind(&merged.name)
        .bind(&merged.email)
        .bind(&merged.phone)
        .bind(&merged.business)
        .bind(&merged.message)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_booking(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        Ok(())
    }

    // ---- Contact ----

    pub async fn list_contact(&self) -> AppResult<Vec<ContactItem>> {
        let rows = sqlx::query_as::<_, ContactItem>(
            r#"
            SELECT id, name, email, business, message, timestamp
            FROM contact_submissions ORDER BY timestamp DESC LIMIT $1
            "#,
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every contact row, uncapped, for CSV export
    pub async fn export_contact(&self) -> AppResult<Vec<ContactItem>> {
        let rows = sqlx::query_as::<_, ContactItem>(
            r#"
            SELECT id, name, email, business, message, timestamp
            FROM contact_submissions ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_contact(&self, id: Uuid) -> AppResult<ContactItem> {
        sqlx::query_as::<_, ContactItem>(
            "SELECT id, name, email, business, message, timestamp FROM contact_submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))
    }

    pub async fn insert_contact(&self, data: &CreateContact) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions (name, email, business, message)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.business)
        .bind(&data.message)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update_contact(&self, id: Uuid, merged: &ContactItem) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contact_submissions
            SET name = $1, email = $2, business = $3, message = $4 WHERE id = $5
            "#,
        )
        .bind(&merged.name)
        .bind(&merged.email)
        .bind(&merged.business)
        .bind(&merged.message)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_contact(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        Ok(())
    }

    // ---- Unsubscribed ----

    pub async fn list_unsubscribed(&self) -> AppResult<Vec<UnsubscribedItem>> {
        let rows = sqlx::query_as::<_, UnsubscribedItem>(
            "SELECT email AS id, email, timestamp FROM unsubscribed_emails ORDER BY timestamp DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Idempotent: re-unsubscribing an email is a no-op
    pub async fn insert_unsubscribed(&self, email: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO unsubscribed_emails (email) VALUES ($1) ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Deleting an unsubscribe record re-subscribes the address
    pub async fn delete_unsubscribed(&self, email: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM unsubscribed_emails WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        Ok(())
    }

    pub async fn unsubscribed_emails(&self) -> AppResult<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT email FROM unsubscribed_emails")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // ---- Counts and audiences ----

    /// Sizes of all four collections, sampled in one round per poll
    pub async fn counts(&self) -> AppResult<SubmissionCounts> {
        let newsletter: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(&self.pool)
            .await?;
        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        let contact: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_submissions")
            .fetch_one(&self.pool)
            .await?;
        let unsubscribed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM unsubscribed_emails")
            .fetch_one(&self.pool)
            .await?;
        Ok(SubmissionCounts {
            newsletter,
            bookings,
            contact,
            unsubscribed,
        })
    }

    /// Unique emails across all three collections
    pub async fn all_unique_emails(&self) -> AppResult<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT email FROM (
                SELECT email FROM newsletter_subscribers
                UNION SELECT email FROM bookings
                UNION SELECT email FROM contact_submissions
            ) u
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn newsletter_recipients(&self) -> AppResult<Vec<Recipient>> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT email FROM newsletter_subscribers ORDER BY timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|email| Recipient { email, name: None })
            .collect())
    }

    /// Booking recipients, deduplicated by email (most recent name wins)
    pub async fn booking_recipients(&self) -> AppResult<Vec<Recipient>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT DISTINCT ON (email) email, name FROM bookings ORDER BY email, timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(email, name)| Recipient {
                email,
                name: non_blank(name),
            })
            .collect())
    }

    pub async fn contact_recipients(&self) -> AppResult<Vec<Recipient>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT email, name FROM contact_submissions ORDER BY timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(email, name)| Recipient {
                email,
                name: non_blank(name),
            })
            .collect())
    }
}
