//! API integration tests
//!
//! These tests expect a running server (default config) with a scratch
//! database, and the bootstrap admin secret.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api";
const ADMIN_KEY: &str = "syllatech-admin";

fn unique_email(tag: &str) -> String {
    format!("{}+{}@example.com", tag, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_admin_requires_key() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/submissions?type=newsletter", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let response = client
        .get(format!("{}/admin/submissions?type=newsletter", BASE_URL))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Unauthorized");
}

#[tokio::test]
#[ignore]
async fn test_newsletter_signup_and_duplicate() {
    let client = Client::new();
    let email = unique_email("newsletter");

    let response = client
        .post(format!("{}/submissions/newsletter", BASE_URL))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");

    // Same address again, different case
    let response = client
        .post(format!("{}/submissions/newsletter", BASE_URL))
        .json(&json!({ "email": email.to_uppercase() }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "This email is already subscribed.");
}

#[tokio::test]
#[ignore]
async fn test_newsletter_signup_requires_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/submissions/newsletter", BASE_URL))
        .json(&json!({ "email": "   " }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Email is required");
}

#[tokio::test]
#[ignore]
async fn test_booking_slot_conflict() {
    let client = Client::new();
    let booking = json!({
        "date": "Monday, June 3, 2030",
        "date_iso": "2030-06-03",
        "time": "09:00 AM",
        "name": "Slot Test",
        "email": unique_email("booking"),
    });

    let response = client
        .post(format!("{}/submissions/bookings", BASE_URL))
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Second booking for the same slot conflicts
    let response = client
        .post(format!("{}/submissions/bookings", BASE_URL))
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["detail"],
        "This time slot is no longer available. Please choose another."
    );

    // The slot shows up as taken
    let response = client
        .get(format!("{}/availability?date=2030-06-03", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let taken = body["taken"].as_array().expect("taken should be an array");
    assert!(taken.iter().any(|t| t == "09:00 AM"));
}

#[tokio::test]
#[ignore]
async fn test_public_booking_config_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/booking/config", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["timeSlots"].is_array());
    assert!(body["blockedDates"].is_array());
    assert!(body["availableWeekdays"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_admin_booking_config_roundtrip() {
    let client = Client::new();

    let response = client
        .put(format!("{}/admin/booking/config", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .json(&json!({
            "blocked_dates": ["2030-12-24"],
            "available_weekdays": [1, 2, 3, 9, -1]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/admin/booking/config", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["blocked_dates"], json!(["2030-12-24"]));
    // Out-of-range weekdays are dropped
    assert_eq!(body["available_weekdays"], json!([1, 2, 3]));

    // A blocked date reports every slot as taken
    let response = client
        .get(format!("{}/availability?date=2030-12-24", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["taken"].as_array().unwrap().is_empty());

    // Restore defaults
    let response = client
        .put(format!("{}/admin/booking/config", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .json(&json!({
            "blocked_dates": [],
            "available_weekdays": [1, 2, 3, 4, 5]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_calendar_grid() {
    let client = Client::new();

    let response = client
        .get(format!("{}/booking/calendar?year=2030&month=6", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["year"], 2030);
    assert_eq!(body["month"], 6);
    // June 2030 starts on a Saturday: 6 leading blanks, 30 day cells
    let days = body["days"].as_array().expect("days should be an array");
    assert_eq!(days.iter().filter(|d| d.is_null()).count(), 6);
    assert_eq!(days.iter().filter(|d| !d.is_null()).count(), 30);
}

#[tokio::test]
#[ignore]
async fn test_unsubscribe_flow() {
    let client = Client::new();
    let email = unique_email("unsub");

    let response = client
        .post(format!("{}/unsubscribe", BASE_URL))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "unsubscribed");

    // Listed in the unsubscribed collection
    let response = client
        .get(format!("{}/admin/submissions?type=unsubscribed", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("items should be an array");
    assert!(items.iter().any(|i| i["email"] == email.to_lowercase()));

    // Deleting re-subscribes
    let response = client
        .delete(format!(
            "{}/admin/submissions/unsubscribed/{}",
            BASE_URL,
            email.to_lowercase()
        ))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_unsubscribe_rejects_invalid_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/unsubscribe", BASE_URL))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Invalid email");
}

#[tokio::test]
#[ignore]
async fn test_audiences() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/email/audiences", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let audiences = body["audiences"].as_array().expect("audiences array");
    let ids: Vec<&str> = audiences
        .iter()
        .filter_map(|a| a["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["newsletter", "bookings", "contact", "all"]);
}

#[tokio::test]
#[ignore]
async fn test_track_visit() {
    let client = Client::new();

    let response = client
        .post(format!("{}/track", BASE_URL))
        .json(&json!({ "path": "/pricing" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_analytics_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/analytics", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_visits"].is_number());
    assert!(body["visits_today"].is_number());
    assert!(body["by_country"].is_array());
    assert!(body["by_region"].is_array());
    assert!(body["visits_by_date"].is_array());
    assert!(body["recent"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_csv_export_headers() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/export/newsletter", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=newsletter-subscribers.csv")
    );
    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("email,timestamp"));
}

#[tokio::test]
#[ignore]
async fn test_delete_reaches_every_collection() {
    let client = Client::new();

    // One row per collection, then delete it through the admin routes
    let newsletter_email = unique_email("del-newsletter");
    client
        .post(format!("{}/submissions/newsletter", BASE_URL))
        .json(&json!({ "email": newsletter_email }))
        .send()
        .await
        .expect("Failed to send request");

    let contact_email = unique_email("del-contact");
    client
        .post(format!("{}/submissions/contact", BASE_URL))
        .json(&json!({
            "name": "Delete Me",
            "email": contact_email,
            "message": "short-lived"
        }))
        .send()
        .await
        .expect("Failed to send request");

    let booking_email = unique_email("del-booking");
    client
        .post(format!("{}/submissions/bookings", BASE_URL))
        .json(&json!({
            "date_iso": "2031-03-10",
            "time": "11:00 AM",
            "name": "Delete Me",
            "email": booking_email
        }))
        .send()
        .await
        .expect("Failed to send request");

    for (kind, email) in [
        ("newsletter", &newsletter_email),
        ("contact", &contact_email),
        ("bookings", &booking_email),
    ] {
        let response = client
            .get(format!("{}/admin/submissions?type={}", BASE_URL, kind))
            .header("x-api-key", ADMIN_KEY)
            .send()
            .await
            .expect("Failed to send request");
        let body: Value = response.json().await.expect("Failed to parse response");
        let id = body["items"]
            .as_array()
            .and_then(|items| items.iter().find(|i| &i["email"] == email.as_str()))
            .and_then(|item| item["id"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| panic!("{} row not listed", kind));

        let response = client
            .delete(format!("{}/admin/submissions/{}/{}", BASE_URL, kind, id))
            .header("x-api-key", ADMIN_KEY)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200, "DELETE {} did not succeed", kind);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "deleted");
    }

    // An unknown ID must reach the handler and 404, never 405
    let ghost = uuid::Uuid::new_v4();
    for kind in ["newsletter", "bookings", "contact"] {
        let response = client
            .delete(format!("{}/admin/submissions/{}/{}", BASE_URL, kind, ghost))
            .header("x-api-key", ADMIN_KEY)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 404, "DELETE {} route not dispatched", kind);
    }
}

#[tokio::test]
#[ignore]
async fn test_csv_export_is_not_capped() {
    let client = Client::new();
    let marker = format!("bulk-{}", uuid::Uuid::new_v4());

    // More subscribers than the admin list view returns
    for n in 0..1050 {
        let response = client
            .post(format!("{}/submissions/newsletter", BASE_URL))
            .json(&json!({ "email": format!("{}+{}@example.com", marker, n) }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    // The list view caps out
    let response = client
        .get(format!("{}/admin/submissions?type=newsletter", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].as_array().unwrap().len() <= 1000);

    // The CSV export carries every row
    let response = client
        .get(format!("{}/admin/export/newsletter", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await
        .expect("Failed to send request");
    let csv = response.text().await.expect("Failed to read body");
    let exported = csv.lines().filter(|line| line.contains(&marker)).count();
    assert_eq!(exported, 1050);
}

#[tokio::test]
#[ignore]
async fn test_unsubscribe_page_renders_html() {
    let client = Client::new();
    let email = unique_email("unsub-page");

    let response = client
        .get(format!("{}/unsubscribe?email={}", BASE_URL, email))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("You're unsubscribed"));

    // Malformed email: an HTML error page, not a JSON detail body
    let response = client
        .get(format!("{}/unsubscribe?email=not-an-email", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Invalid request"));
    assert!(!body.contains("detail"));
}

#[tokio::test]
#[ignore]
async fn test_change_password_validation() {
    let client = Client::new();

    let response = client
        .put(format!("{}/admin/password", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .json(&json!({
            "current_password": "definitely-wrong",
            "new_password": "irrelevant"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Current password is incorrect");

    let response = client
        .put(format!("{}/admin/password", BASE_URL))
        .header("x-api-key", ADMIN_KEY)
        .json(&json!({
            "current_password": ADMIN_KEY,
            "new_password": "abc"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "New password must be at least 4 characters");
}
