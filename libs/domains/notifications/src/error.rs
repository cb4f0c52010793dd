//! Error types for the notifications domain.

use thiserror::Error;
use uuid::Uuid;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur in the notifications domain.
///
/// Channel-level delivery failures are deliberately not represented here:
/// they are captured inside `ChannelResult` and never propagate as errors.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Notification not found (or not owned by the requesting user).
    #[error("Notification not found: {0}")]
    NotFound(Uuid),

    /// Malformed event or request, rejected before any dispatch logic runs.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Preference or notification store unreachable/failing.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for NotificationError {
    fn from(err: sea_orm::DbErr) -> Self {
        NotificationError::Persistence(err.to_string())
    }
}

impl From<validator::ValidationErrors> for NotificationError {
    fn from(err: validator::ValidationErrors) -> Self {
        NotificationError::Validation(err.to_string())
    }
}
