//! Notification email template rendering.
//!
//! Handlebars-based rendering of the Inkquiries notification email:
//! a branded header, the notification message, an optional call-to-action
//! button, and a footer with a preferences hint.

use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{EmailError, EmailResult};

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Subject line.
    pub subject: String,
}

/// Data for rendering a notification email.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEmailData {
    /// Subject line (also used as the page title).
    pub subject: String,
    /// The notification message body.
    pub message: String,
    /// Optional call-to-action link.
    pub action_link: Option<String>,
    /// Label for the call-to-action button.
    pub action_text: String,
    /// Current year for the footer copyright line.
    pub year: i32,
}

impl NotificationEmailData {
    /// Create rendering data for a notification.
    pub fn new(
        subject: impl Into<String>,
        message: impl Into<String>,
        action_link: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            action_link,
            action_text: "View Details".to_string(),
            year: Utc::now().year(),
        }
    }

    /// Override the call-to-action button label.
    pub fn with_action_text(mut self, text: impl Into<String>) -> Self {
        self.action_text = text.into();
        self
    }
}

/// Template engine for rendering notification emails.
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> EmailResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_template_string("notification_html", NOTIFICATION_HTML_TEMPLATE)
            .map_err(|e| {
                EmailError::Template(format!("Failed to register notification_html: {}", e))
            })?;
        handlebars
            .register_template_string("notification_text", NOTIFICATION_TEXT_TEMPLATE)
            .map_err(|e| {
                EmailError::Template(format!("Failed to register notification_text: {}", e))
            })?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render a notification email.
    pub fn render_notification(&self, data: &NotificationEmailData) -> EmailResult<RenderedEmail> {
        debug!(subject = %data.subject, "Rendering notification email");

        let html = self.handlebars.render("notification_html", data)?;
        let text = self.handlebars.render("notification_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: data.subject.clone(),
        })
    }
}

const NOTIFICATION_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{subject}}</title>
  <style>
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background-color: #000; padding: 20px; text-align: center; }
    .header h1 { color: #fff; margin: 0; }
    .content { padding: 20px; background-color: #f9f9f9; }
    .button { display: inline-block; background-color: #000; color: #fff; padding: 10px 20px; text-decoration: none; border-radius: 5px; margin-top: 20px; }
    .footer { text-align: center; padding: 20px; font-size: 12px; color: #666; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Inkquiries Notification</h1>
    </div>
    <div class="content">
      <p>Hello,</p>
      <p>{{message}}</p>
      {{#if action_link}}<p><a href="{{action_link}}" class="button">{{action_text}}</a></p>{{/if}}
      <p>Thank you for using Inkquiries!</p>
    </div>
    <div class="footer">
      <p>&copy; {{year}} Inkquiries. All rights reserved.</p>
      <p>If you prefer not to receive these emails, you can update your notification preferences in your account settings.</p>
    </div>
  </div>
</body>
</html>
"#;

const NOTIFICATION_TEXT_TEMPLATE: &str = r#"Hello,

{{message}}

{{#if action_link}}{{action_text}}: {{action_link}}

{{/if}}Thank you for using Inkquiries!

(c) {{year}} Inkquiries. All rights reserved.
If you prefer not to receive these emails, you can update your notification
preferences in your account settings.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_message_and_button() {
        let engine = TemplateEngine::new().unwrap();
        let data = NotificationEmailData::new(
            "New Review",
            "You received a new review.",
            Some("https://inkquiries.com/review/1".to_string()),
        );

        let rendered = engine.render_notification(&data).unwrap();

        assert!(rendered.html.contains("You received a new review."));
        assert!(rendered.html.contains("https://inkquiries.com/review/1"));
        assert!(rendered.html.contains("View Details"));
        assert!(rendered.text.contains("You received a new review."));
        assert_eq!(rendered.subject, "New Review");
    }

    #[test]
    fn omits_button_without_action_link() {
        let engine = TemplateEngine::new().unwrap();
        let data = NotificationEmailData::new("Hi", "No link here.", None);

        let rendered = engine.render_notification(&data).unwrap();

        assert!(!rendered.html.contains("class=\"button\""));
        assert!(!rendered.text.contains("View Details"));
    }

    #[test]
    fn custom_action_text() {
        let engine = TemplateEngine::new().unwrap();
        let data = NotificationEmailData::new(
            "Reminder",
            "Upload a healed photo.",
            Some("https://inkquiries.com/upload".to_string()),
        )
        .with_action_text("Upload Photo");

        let rendered = engine.render_notification(&data).unwrap();
        assert!(rendered.html.contains("Upload Photo"));
    }
}
