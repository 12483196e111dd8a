//! CSV export endpoints for the admin back-office

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::AppResult, AppState};

use super::AdminKey;

/// RFC 4180 field quoting
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[&str]) -> String {
    fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",")
}

fn csv_response(filename: &str, content: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        content,
    )
        .into_response()
}

/// Multi-line messages flatten to one CSV line
fn single_line(value: &str) -> String {
    value.replace('\n', " ")
}

/// Export newsletter subscribers as CSV
#[utoipa::path(
    get,
    path = "/admin/export/newsletter",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn export_newsletter(
    State(state): State<AppState>,
    _: AdminKey,
) -> AppResult<Response> {
    let items = state.services.submissions.newsletter_rows().await?;

    let mut out = csv_row(&["email", "timestamp"]) + "\n";
    for item in items {
        out.push_str(&csv_row(&[&item.email, &item.timestamp.to_rfc3339()]));
        out.push('\n');
    }
    Ok(csv_response("newsletter-subscribers.csv", out))
}

/// Export bookings as CSV
#[utoipa::path(
    get,
    path = "/admin/export/bookings",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv")
    )
)]
pub async fn export_bookings(State(state): State<AppState>, _: AdminKey) -> AppResult<Response> {
    let items = state.services.submissions.booking_rows().await?;

    let mut out = csv_row(&[
        "date", "date_iso", "time", "name", "email", "phone", "business", "message", "timestamp",
    ]) + "\n";
    for item in items {
        let message = single_line(item.message.as_deref().unwrap_or(""));
        out.push_str(&csv_row(&[
            item.date.as_deref().unwrap_or(""),
            item.date_iso.as_deref().unwrap_or(""),
            item.time.as_deref().unwrap_or(""),
            &item.name,
            &item.email,
            item.phone.as_deref().unwrap_or(""),
            item.business.as_deref().unwrap_or(""),
            &message,
            &item.timestamp.to_rfc3339(),
        ]));
        out.push('\n');
    }
    Ok(csv_response("bookings.csv", out))
}

/// Export contact submissions as CSV
#[utoipa::path(
    get,
    path = "/admin/export/contact",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv")
    )
)]
pub async fn export_contact(State(state): State<AppState>, _: AdminKey) -> AppResult<Response> {
    let items = state.services.submissions.contact_rows().await?;

    let mut out = csv_row(&["name", "email", "business", "message", "timestamp"]) + "\n";
    for item in items {
        let message = single_line(&item.message);
        out.push_str(&csv_row(&[
            &item.name,
            &item.email,
            item.business.as_deref().unwrap_or(""),
            &message,
            &item.timestamp.to_rfc3339(),
        ]));
        out.push('\n');
    }
    Ok(csv_response("contact-submissions.csv", out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quotes_specials() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_row() {
        assert_eq!(csv_row(&["a", "b,c", ""]), "a,\"b,c\",");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("two\nlines"), "two lines");
    }
}
