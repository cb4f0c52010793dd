//! Mail transport implementations.
//!
//! This module contains the `MailTransport` trait and implementations
//! for sending mail over SMTP, plus a capturing mock for tests.

pub mod mock;
pub mod smtp;

pub use mock::MockTransport;
pub use smtp::{SmtpConfig, SmtpMailTransport};

use crate::error::EmailResult;
use crate::models::Email;
use async_trait::async_trait;

/// Result of a successful send.
#[derive(Debug, Clone)]
pub struct SendResult {
    /// Transport-specific message ID for tracking.
    pub message_id: String,
}

/// Trait for mail transports.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send an email.
    async fn send(&self, email: &Email) -> EmailResult<SendResult>;

    /// Check if the transport is healthy/configured.
    async fn health_check(&self) -> EmailResult<()>;

    /// Get the transport name for logging.
    fn name(&self) -> &'static str;
}
