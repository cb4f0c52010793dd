//! SMTP mail transport implementation using lettre.

use super::{MailTransport, SendResult};
use crate::error::{EmailError, EmailResult};
use crate::models::Email;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// SMTP configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Sender email address.
    pub from_email: String,
    /// Sender name.
    pub from_name: String,
    /// SMTP username.
    pub username: Option<String>,
    /// SMTP password.
    pub password: Option<String>,
    /// Whether to use TLS (true for 465, typically false for 587/1025 dev servers).
    pub use_tls: bool,
}

impl SmtpConfig {
    /// Create a new SMTP configuration.
    pub fn new(host: String, port: u16, from_email: String, from_name: String) -> Self {
        Self {
            host,
            port,
            from_email,
            from_name,
            username: None,
            password: None,
            use_tls: false,
        }
    }

    /// Read configuration from `EMAIL_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("EMAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: std::env::var("EMAIL_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            from_email: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@inkquiries.com".to_string()),
            from_name: std::env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "Inkquiries".to_string()),
            username: std::env::var("EMAIL_USER").ok(),
            password: std::env::var("EMAIL_PASSWORD").ok(),
            use_tls: std::env::var("EMAIL_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Builder method to set TLS.
    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Builder method to set credentials.
    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }
}

/// SMTP mail transport.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: Arc<SmtpConfig>,
}

impl SmtpMailTransport {
    /// Create a new SMTP transport.
    pub fn new(config: SmtpConfig) -> EmailResult<Self> {
        let transport = Self::build_transport(&config)?;
        Ok(Self {
            transport,
            config: Arc::new(config),
        })
    }

    /// Create a transport configured from the environment.
    pub fn from_env() -> EmailResult<Self> {
        Self::new(SmtpConfig::from_env())
    }

    fn build_transport(
        config: &SmtpConfig,
    ) -> EmailResult<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| EmailError::Config(format!("Failed to create SMTP relay: {}", e)))?
                .port(config.port)
        } else {
            // STARTTLS-less transport, used for local dev servers like Mailpit
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port)
        };

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(builder.build())
    }

    /// Build a lettre Message from an Email.
    fn build_message(&self, email: &Email) -> EmailResult<Message> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("from: {}", e)))?;

        let to: Mailbox = match &email.to_name {
            Some(name) if !name.is_empty() => format!("{} <{}>", name, email.to).parse(),
            _ => email.to.parse(),
        }
        .map_err(|e| EmailError::InvalidAddress(format!("to '{}': {}", email.to, e)))?;

        let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let mailbox: Mailbox = reply_to
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("reply-to: {}", e)))?;
            builder = builder.reply_to(mailbox);
        }

        let message = match (&email.text, &email.html) {
            (Some(text), Some(html)) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            ),
            (None, Some(html)) => builder
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html.clone()),
                ),
            (Some(text), None) => builder
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text.clone()),
                ),
            (None, None) => return Err(EmailError::MissingField("body")),
        }
        .map_err(|e| EmailError::Transport(format!("Failed to build message: {}", e)))?;

        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: &Email) -> EmailResult<SendResult> {
        email.validate()?;

        debug!(
            to = %email.to,
            subject = %email.subject,
            host = %self.config.host,
            port = %self.config.port,
            "Sending email via SMTP"
        );

        let message = self.build_message(email)?;

        let response = self.transport.send(message).await.map_err(|e| {
            error!(to = %email.to, error = %e, "SMTP send failed");
            EmailError::Transport(e.to_string())
        })?;

        let message_id = response
            .message()
            .collect::<Vec<_>>()
            .join(" ");

        info!(to = %email.to, message_id = %message_id, "Email sent");

        Ok(SendResult { message_id })
    }

    async fn health_check(&self) -> EmailResult<()> {
        let ok = self
            .transport
            .test_connection()
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;
        if ok {
            Ok(())
        } else {
            Err(EmailError::Transport("SMTP connection test failed".into()))
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_credentials() {
        let config = SmtpConfig::new(
            "localhost".into(),
            1025,
            "noreply@inkquiries.com".into(),
            "Inkquiries".into(),
        )
        .with_credentials("user".into(), "pass".into())
        .with_tls(true);

        assert_eq!(config.username.as_deref(), Some("user"));
        assert!(config.use_tls);
    }

    #[test]
    fn build_message_multipart() {
        let config = SmtpConfig::new(
            "localhost".into(),
            1025,
            "noreply@inkquiries.com".into(),
            "Inkquiries".into(),
        );
        let transport = SmtpMailTransport::new(config).unwrap();

        let email = Email::new("user@example.com", "Subject")
            .with_text("text body")
            .with_html("<p>html body</p>");

        assert!(transport.build_message(&email).is_ok());
    }

    #[test]
    fn build_message_rejects_bad_address() {
        let config = SmtpConfig::new(
            "localhost".into(),
            1025,
            "noreply@inkquiries.com".into(),
            "Inkquiries".into(),
        );
        let transport = SmtpMailTransport::new(config).unwrap();

        let email = Email::new("not-an-address", "Subject").with_text("body");
        assert!(matches!(
            transport.build_message(&email),
            Err(EmailError::InvalidAddress(_))
        ));
    }
}
