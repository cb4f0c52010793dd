//! Email message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EmailError, EmailResult};

/// An email message ready to be handed to a transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// Unique message identifier.
    pub id: Uuid,
    /// Recipient email address.
    pub to: String,
    /// Recipient name (for personalization).
    pub to_name: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body content.
    pub html: Option<String>,
    /// Plain text body content.
    pub text: Option<String>,
    /// Reply-To address.
    pub reply_to: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Email {
    /// Create a new email with the given recipient and subject.
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            to: to.into(),
            to_name: None,
            subject: subject.into(),
            html: None,
            text: None,
            reply_to: None,
            created_at: Utc::now(),
        }
    }

    /// Set the HTML body.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the plain text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the recipient name.
    pub fn with_to_name(mut self, name: impl Into<String>) -> Self {
        self.to_name = Some(name.into());
        self
    }

    /// Set the Reply-To address.
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Check that the message carries everything a transport needs:
    /// a recipient, a subject, and at least one body part.
    pub fn validate(&self) -> EmailResult<()> {
        if self.to.trim().is_empty() {
            return Err(EmailError::MissingField("to"));
        }
        if self.subject.trim().is_empty() {
            return Err(EmailError::MissingField("subject"));
        }
        if self.html.is_none() && self.text.is_none() {
            return Err(EmailError::MissingField("body"));
        }
        Ok(())
    }
}
