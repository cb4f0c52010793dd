//! Capturing mail transport for tests.

use super::{MailTransport, SendResult};
use crate::error::{EmailError, EmailResult};
use crate::models::Email;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// How the mock behaves on `send`.
enum FailureMode {
    /// Deliver everything.
    None,
    /// Reject every send with this message.
    All(String),
    /// Reject sends to these addresses only.
    Recipients(HashSet<String>),
}

/// Transport that records deliveries instead of performing them.
///
/// Each accepted message is logged together with the `SendResult` the
/// caller saw, so tests can assert on both.
pub struct MockTransport {
    log: Mutex<Vec<(Email, SendResult)>>,
    failure: FailureMode,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            failure: FailureMode::None,
        }
    }

    /// A transport where every send fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            failure: FailureMode::All(message.into()),
        }
    }

    /// A transport that rejects sends to the given addresses and
    /// delivers everything else.
    pub fn rejecting<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            log: Mutex::new(Vec::new()),
            failure: FailureMode::Recipients(
                addresses.into_iter().map(Into::into).collect(),
            ),
        }
    }

    /// Every email accepted so far, in send order.
    pub async fn sent_emails(&self) -> Vec<Email> {
        self.log
            .lock()
            .await
            .iter()
            .map(|(email, _)| email.clone())
            .collect()
    }

    /// The `SendResult`s handed back so far, in send order.
    pub async fn send_results(&self) -> Vec<SendResult> {
        self.log
            .lock()
            .await
            .iter()
            .map(|(_, result)| result.clone())
            .collect()
    }

    pub async fn sent_count(&self) -> usize {
        self.log.lock().await.len()
    }

    /// Whether any accepted email was addressed to `address`.
    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.log.lock().await.iter().any(|(e, _)| e.to == address)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, email: &Email) -> EmailResult<SendResult> {
        match &self.failure {
            FailureMode::All(message) => {
                return Err(EmailError::Transport(message.clone()));
            }
            FailureMode::Recipients(rejected) if rejected.contains(&email.to) => {
                return Err(EmailError::Transport(format!(
                    "recipient rejected: {}",
                    email.to
                )));
            }
            _ => {}
        }

        email.validate()?;

        let result = SendResult {
            message_id: format!("mock-{}", email.id),
        };
        self.log.lock().await.push((email.clone(), result.clone()));

        Ok(result)
    }

    async fn health_check(&self) -> EmailResult<()> {
        match &self.failure {
            FailureMode::All(_) => Err(EmailError::Transport("transport disabled".into())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logs_accepted_email_with_its_result() {
        let transport = MockTransport::new();
        let email = Email::new("test@example.com", "Test Subject").with_text("Test body");

        let result = transport.send(&email).await.unwrap();
        assert_eq!(result.message_id, format!("mock-{}", email.id));

        let sent = transport.sent_emails().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "test@example.com");
        assert!(transport.was_sent_to("test@example.com").await);
        assert!(!transport.was_sent_to("other@example.com").await);

        let results = transport.send_results().await;
        assert_eq!(results[0].message_id, result.message_id);
    }

    #[tokio::test]
    async fn failing_transport_returns_error() {
        let transport = MockTransport::failing("Simulated failure");
        let email = Email::new("test@example.com", "Test Subject").with_text("Test body");

        let err = transport.send(&email).await.unwrap_err();
        assert!(err.to_string().contains("Simulated failure"));
        assert_eq!(transport.sent_count().await, 0);
        assert!(transport.health_check().await.is_err());
    }

    #[tokio::test]
    async fn rejects_only_listed_recipients() {
        let transport = MockTransport::rejecting(["bounce@example.com"]);

        let bounced = Email::new("bounce@example.com", "Hi").with_text("body");
        let delivered = Email::new("ok@example.com", "Hi").with_text("body");

        assert!(transport.send(&bounced).await.is_err());
        assert!(transport.send(&delivered).await.is_ok());

        assert_eq!(transport.sent_count().await, 1);
        assert!(transport.was_sent_to("ok@example.com").await);
        assert!(!transport.was_sent_to("bounce@example.com").await);
    }

    #[tokio::test]
    async fn invalid_email_is_not_logged() {
        let transport = MockTransport::new();
        let no_body = Email::new("test@example.com", "Subject");

        assert!(transport.send(&no_body).await.is_err());
        assert_eq!(transport.sent_count().await, 0);
    }
}
