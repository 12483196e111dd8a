//! Email service: transactional sends (welcome, booking confirmation,
//! owner notification, admin replies) and bulk campaigns over SMTP.

use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::{EmailConfig, SiteConfig},
    error::{AppError, AppResult},
};

/// Inline SVG logo shipped inside HTML emails
const LOGO_BASE64: &str = "PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjQwIiB2aWV3Qm94PSIwIDAgMjAwIDQwIiBmaWxsPSJub25lIiB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciPjxkZWZzPjxsaW5lYXJHcmFkaWVudCBpZD0iZyIgeDE9IjAlIiB5MT0iMCUiIHgyPSIxMDAlIiB5Mj0iMTAwJSI+PHN0b3Agb2Zmc2V0PSIwJSIgc3RvcC1jb2xvcj0iIzA2YjZkNCIvPjxzdG9wIG9mZnNldD0iMTAwJSIgc3RvcC1jb2xvcj0iIzNiODJmNiIvPjwvbGluZWFyR3JhZGllbnQ+PC9kZWZzPjxyZWN0IHg9IjAiIHk9IjQiIHdpZHRoPSIzMiIgaGVpZ2h0PSIzMiIgcng9IjgiIGZpbGw9InVybCgjZykiLz48cGF0aCBkPSJNMTYgMTBDMTIuNSAxMCAxMCAxMiAxMCAxNC41QzEwIDE3IDEyIDE4LjUgMTYgMTkuNUMyMCAyMC41IDIyIDIyIDIyIDI0LjVDMjIgMjcgMTkuNSAyOSAxNiAyOUMxMi41IDI5IDEwIDI3LjUgMTAgMjUiIHN0cm9rZT0id2hpdGUiIHN0cm9rZS13aWR0aD0iMi41IiBzdHJva2UtbGluZWNhcD0icm91bmQiIGZpbGw9Im5vbmUiLz48Y2lyY2xlIGN4PSIyMiIgY3k9IjEzIiByPSIyIiBmaWxsPSJ3aGl0ZSIgb3BhY2l0eT0iMC45Ii8+PHRleHQgeD0iNDIiIHk9IjI4IiBmb250LWZhbWlseT0ic2Fucy1zZXJpZiIgZm9udC1zaXplPSIyMiIgZm9udC13ZWlnaHQ9IjcwMCIgZmlsbD0iI2Y4ZmFmYyI+PHRzcGFuIGZpbGw9InVybCgjZykiPlN5bGxhPC90c3Bhbj48dHNwYW4gZmlsbD0iI2Y4ZmFmYyI+VGVjaDwvdHNwYW4+PC90ZXh0Pjwvc3ZnPg==";

/// Placeholder replaced (or appended as a footer) in every campaign email
const UNSUBSCRIBE_PLACEHOLDER: &str = "{{UNSUBSCRIBE_URL}}";

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    site: SiteConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig, site: SiteConfig) -> Self {
        Self { config, site }
    }

    /// Whether SMTP delivery is configured at all
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Error used by endpoints that refuse to run without SMTP
    pub fn ensure_configured(&self) -> AppResult<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(AppError::EmailNotConfigured(
                "Email not configured. Set the SMTP host in the server configuration".to_string(),
            ))
        }
    }

    /// Owner address for new-booking notifications
    pub fn owner_email(&self) -> String {
        self.config
            .owner_email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| self.config.smtp_from.clone())
    }

    /// Unsubscribe link for a recipient: site URL when known, backend
    /// endpoint otherwise.
    pub fn unsubscribe_url(&self, to_email: &str) -> String {
        let encoded = urlencoding::encode(to_email);
        match self.site.site_url.as_deref().map(str::trim) {
            Some(site) if !site.is_empty() => {
                format!("{}/unsubscribe?email={}", site.trim_end_matches('/'), encoded)
            }
            _ => format!(
                "{}/api/unsubscribe?email={}",
                self.site.backend_url.trim_end_matches('/'),
                encoded
            ),
        }
    }

    /// Replace the `{{UNSUBSCRIBE_URL}}` placeholder, or append a footer
    /// when the campaign HTML carries none.
    pub fn inject_unsubscribe(&self, html_body: &str, to_email: &str) -> String {
        let url = self.unsubscribe_url(to_email);
        if html_body.contains(UNSUBSCRIBE_PLACEHOLDER) {
            return html_body.replace(UNSUBSCRIBE_PLACEHOLDER, &url);
        }
        format!(
            r#"{}
<div style="margin-top:32px;padding-top:24px;border-top:1px solid #334155;font-size:12px;color:#64748b;text-align:center;">
  <a href="{}" style="color:#64748b;text-decoration:underline;">Unsubscribe</a> from these emails
</div>"#,
            html_body.trim_end(),
            url
        )
    }

    /// Synchronous SMTP send. Callers on the async path wrap this in
    /// `spawn_blocking`.
    pub fn send_html(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()> {
        let from_name = self.config.smtp_from_name.as_deref().unwrap_or("SyllaTech");
        let from_mailbox =
            Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
                .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    /// Queue a single transactional send in the background.
    ///
    /// Failures are logged; the caller has already responded by the time
    /// the send runs.
    pub fn queue_send(&self, to: String, subject: String, html_body: String) {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = service.send_html(&to, &subject, &html_body) {
                tracing::error!("Failed to send email to {}: {}", to, e);
            }
        });
    }

    /// Queue a campaign: one send per recipient with the unsubscribe link
    /// injected, failures logged and skipped.
    pub fn queue_campaign(&self, recipients: Vec<String>, subject: String, html_body: String) {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            for to in recipients {
                let body = service.inject_unsubscribe(&html_body, &to);
                if let Err(e) = service.send_html(&to, &subject, &body) {
                    tracing::error!("Failed to send campaign email to {}: {}", to, e);
                }
            }
        });
    }
}

/// Minimal HTML entity escaping for values interpolated into templates
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wrap bare text in a paragraph; leave markup untouched
pub fn normalize_reply_body(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = if trimmed.is_empty() { "No content." } else { trimmed };
    if body.contains('<') || body.contains('>') {
        body.to_string()
    } else {
        format!("<p>{}</p>", body.replace('\n', "<br/>"))
    }
}

fn layout(badge: &str, inner: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; background-color: #030712; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #030712; min-height: 100vh;">
    <tr>
      <td align="center" style="padding: 40px 20px;">
        <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 560px;">
          <tr>
            <td align="center" style="padding-bottom: 32px;">
              <img src="data:image/svg+xml;base64,{logo}" alt="SyllaTech" width="180" height="36" style="display: block; height: auto;" />
            </td>
          </tr>
          <tr>
            <td style="background-color: #0f172a; border: 1px solid #1e293b; border-radius: 24px; padding: 48px 40px;">
              <span style="display: inline-block; background: rgba(6,182,212,0.15); border: 1px solid rgba(6,182,212,0.3); border-radius: 9999px; padding: 8px 16px; font-size: 13px; font-weight: 600; color: #22d3ee; margin-bottom: 24px;">{badge}</span>
              {inner}
            </td>
          </tr>
          <tr>
            <td align="center" style="padding-top: 32px;">
              <p style="margin: 0; font-size: 12px; color: #64748b;">{footer}</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#,
        logo = LOGO_BASE64,
        badge = badge,
        inner = inner,
        footer = footer,
    )
}

/// Welcome email sent after a newsletter signup
pub fn newsletter_welcome_html() -> String {
    let inner = r#"<h1 style="margin: 0 0 16px; font-size: 28px; font-weight: 700; color: #ffffff; line-height: 1.3;">Thanks for subscribing!</h1>
              <p style="margin: 0 0 24px; font-size: 16px; color: #94a3b8; line-height: 1.6;">You're now part of the SyllaTech community. We'll send you web development tips, exclusive offers, and free resources — no spam, ever.</p>
              <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="margin-bottom: 24px;">
                <tr><td style="padding: 8px 0;"><span style="color: #22d3ee;">&#10003;</span> <span style="color: #cbd5e1; font-size: 15px;">Web development tips &amp; trends</span></td></tr>
                <tr><td style="padding: 8px 0;"><span style="color: #22d3ee;">&#10003;</span> <span style="color: #cbd5e1; font-size: 15px;">Exclusive early-bird discounts</span></td></tr>
                <tr><td style="padding: 8px 0;"><span style="color: #22d3ee;">&#10003;</span> <span style="color: #cbd5e1; font-size: 15px;">Free resources &amp; templates</span></td></tr>
              </table>
              <table role="presentation" width="100%" cellspacing="0" cellpadding="0">
                <tr><td align="center">
                  <a href="https://syllatech.com/#services" style="display: inline-block; background: linear-gradient(90deg, #06b6d4 0%, #3b82f6 100%); color: #ffffff !important; font-size: 15px; font-weight: 600; text-decoration: none; padding: 14px 32px; border-radius: 12px;">Explore our services &rarr;</a>
                </td></tr>
              </table>"#;
    let footer = format!(
        r#"SyllaTech — Premium Websites &amp; Full-Stack Apps</p>
              <p style="margin: 12px 0 0; font-size: 12px; color: #64748b;"><a href="{}" style="color: #64748b; text-decoration: underline;">Unsubscribe</a> from these emails"#,
        UNSUBSCRIBE_PLACEHOLDER
    );
    layout("You're In!", inner, &footer)
}

/// Confirmation email sent to the visitor after a booking
pub fn booking_confirmation_html(name: &str, date: &str, time: &str) -> String {
    let date_display = if date.is_empty() { "your chosen date" } else { date };
    let inner = format!(
        r#"<h1 style="margin: 0 0 16px; font-size: 28px; font-weight: 700; color: #ffffff; line-height: 1.3;">Hi {name}!</h1>
              <p style="margin: 0 0 24px; font-size: 16px; color: #94a3b8; line-height: 1.6;">Your free consultation is confirmed.</p>
              <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background: #1e293b; border-radius: 12px; margin-bottom: 32px;">
                <tr>
                  <td style="padding: 24px;">
                    <p style="margin: 0 0 8px; font-size: 13px; color: #64748b;">Date</p>
                    <p style="margin: 0; font-size: 18px; font-weight: 600; color: #ffffff;">{date}</p>
                    <p style="margin: 16px 0 8px; font-size: 13px; color: #64748b;">Time</p>
                    <p style="margin: 0; font-size: 18px; font-weight: 600; color: #ffffff;">{time}</p>
                  </td>
                </tr>
              </table>
              <p style="margin: 0; font-size: 15px; color: #cbd5e1; line-height: 1.6;">We'll send a calendar invite shortly. If you need to reschedule, reply to this email or contact us.</p>"#,
        name = escape_html(name),
        date = escape_html(date_display),
        time = escape_html(time),
    );
    layout(
        "Booking Confirmed",
        &inner,
        "SyllaTech — Premium Websites &amp; Full-Stack Apps",
    )
}

/// Notification email sent to the site owner after a booking
pub fn owner_booking_notification_html(
    name: &str,
    email: &str,
    date: &str,
    time: &str,
    phone: &str,
    business: &str,
    message: &str,
) -> String {
    let field = |label: &str, value: &str| {
        format!(
            r#"<tr><td style="padding: 6px 0;"><span style="color: #64748b; font-size: 13px;">{}</span></td></tr>
                      <tr><td style="padding: 0 0 12px;"><span style="color: #fff; font-size: 16px;">{}</span></td></tr>"#,
            label,
            if value.is_empty() { "—".to_string() } else { escape_html(value) },
        )
    };
    let inner = format!(
        r#"<h1 style="margin: 0 0 8px; font-size: 24px; font-weight: 700; color: #ffffff;">Consultation Scheduled</h1>
              <p style="margin: 0 0 24px; font-size: 15px; color: #94a3b8;">A visitor just booked a consultation. Reminder details below.</p>
              <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background: #1e293b; border-radius: 12px; margin-bottom: 20px;">
                <tr>
                  <td style="padding: 20px;">
                    <table role="presentation" width="100%" cellspacing="0" cellpadding="0">
                      {date}
                      {time}
                      {name}
                      {email}
                      {phone}
                      {business}
                      {message}
                    </table>
                  </td>
                </tr>
              </table>
              <p style="margin: 0; font-size: 13px; color: #64748b;">Check your admin dashboard for full details.</p>"#,
        date = field("Date", date),
        time = field("Time", time),
        name = field("Name", name),
        email = field("Email", email),
        phone = field("Phone", phone),
        business = field("Business", business),
        message = field("Message", message),
    );
    layout("New Booking", &inner, "SyllaTech Admin Notification")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(site_url: Option<&str>) -> EmailService {
        EmailService::new(
            EmailConfig::default(),
            SiteConfig {
                site_url: site_url.map(|s| s.to_string()),
                backend_url: "http://localhost:8000".to_string(),
            },
        )
    }

    #[test]
    fn test_unsubscribe_url_prefers_site() {
        let svc = service(Some("https://syllatech.com/"));
        assert_eq!(
            svc.unsubscribe_url("a@b.com"),
            "https://syllatech.com/unsubscribe?email=a%40b.com"
        );
    }

    #[test]
    fn test_unsubscribe_url_falls_back_to_backend() {
        let svc = service(None);
        assert_eq!(
            svc.unsubscribe_url("a@b.com"),
            "http://localhost:8000/api/unsubscribe?email=a%40b.com"
        );
    }

    #[test]
    fn test_inject_unsubscribe_replaces_placeholder() {
        let svc = service(None);
        let html = "<p>Offer</p><a href=\"{{UNSUBSCRIBE_URL}}\">bye</a>";
        let out = svc.inject_unsubscribe(html, "a@b.com");
        assert!(!out.contains("{{UNSUBSCRIBE_URL}}"));
        assert!(out.contains("a%40b.com"));
        // No footer appended when the placeholder was present
        assert!(!out.contains("from these emails"));
    }

    #[test]
    fn test_inject_unsubscribe_appends_footer() {
        let svc = service(None);
        let out = svc.inject_unsubscribe("<p>Offer</p>", "a@b.com");
        assert!(out.contains("Unsubscribe</a> from these emails"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>&"quoted"</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_normalize_reply_body_wraps_plain_text() {
        assert_eq!(
            normalize_reply_body("hello\nthere"),
            "<p>hello<br/>there</p>"
        );
        assert_eq!(normalize_reply_body("  "), "<p>No content.</p>");
        assert_eq!(normalize_reply_body("<p>hi</p>"), "<p>hi</p>");
    }

    #[test]
    fn test_templates_escape_user_input() {
        let html = booking_confirmation_html("<script>", "Friday, March 7, 2025", "09:00 AM");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let html = owner_booking_notification_html("A", "a@b.com", "", "", "", "", "<img>");
        assert!(html.contains("&lt;img&gt;"));
        // Missing optional fields render as a dash
        assert!(html.contains("—"));
    }

    #[test]
    fn test_welcome_template_has_unsubscribe_placeholder() {
        assert!(newsletter_welcome_html().contains(UNSUBSCRIBE_PLACEHOLDER));
    }
}
