//! Error types for the email transport crate.

use thiserror::Error;

/// Result type for email operations.
pub type EmailResult<T> = Result<T, EmailError>;

/// Errors that can occur when building or sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// A required field (recipient, subject, body) is missing.
    #[error("Missing required email field: {0}")]
    MissingField(&'static str),

    /// An address failed to parse.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template rendering error: {0}")]
    Template(String),

    /// The underlying transport rejected or failed to deliver the message.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Transport configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<handlebars::RenderError> for EmailError {
    fn from(err: handlebars::RenderError) -> Self {
        EmailError::Template(err.to_string())
    }
}
