//! Email transport library for Inkquiries.
//!
//! Provides the `MailTransport` capability consumed by the notification
//! domain: a trait for sending a single email, an SMTP implementation via
//! lettre, a capturing mock for tests, and the Handlebars template engine
//! that renders the branded notification email body.
//!
//! # Usage
//!
//! ```rust,ignore
//! use inkq_email::{Email, MailTransport, SmtpMailTransport, TemplateEngine};
//!
//! let transport = SmtpMailTransport::from_env()?;
//! let templates = TemplateEngine::new()?;
//!
//! let rendered = templates.render_notification(&data)?;
//! let email = Email::new("artist@example.com", rendered.subject)
//!     .with_html(rendered.html)
//!     .with_text(rendered.text);
//! transport.send(&email).await?;
//! ```

pub mod error;
pub mod models;
pub mod templates;
pub mod transport;

pub use error::{EmailError, EmailResult};
pub use models::Email;
pub use templates::{NotificationEmailData, RenderedEmail, TemplateEngine};
pub use transport::{MailTransport, MockTransport, SendResult, SmtpConfig, SmtpMailTransport};
