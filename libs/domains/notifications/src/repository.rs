//! Capability traits consumed by the notifications domain.
//!
//! Persistence, identity lookup, and user enumeration are injected behind
//! these traits so components can be wired with test doubles.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::NotificationResult;
use crate::models::{
    CreateNotification, Notification, NotificationFilter, NotificationPreference, UserType,
};

/// Persistence for `NotificationPreference` records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetch the preference record for a (user_id, user_type) pair.
    async fn find(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<Option<NotificationPreference>>;

    /// Insert a record unless one already exists for its (user_id, user_type)
    /// pair, and return the stored row either way. Concurrent first-access
    /// races are resolved here: defaults are identical, so whichever insert
    /// wins is fine.
    async fn create(
        &self,
        preference: NotificationPreference,
    ) -> NotificationResult<NotificationPreference>;

    /// Persist an updated record.
    async fn save(
        &self,
        preference: NotificationPreference,
    ) -> NotificationResult<NotificationPreference>;
}

/// Persistence for `Notification` records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Create a notification. A single atomic insert: a cancelled dispatch
    /// leaves no partial record.
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification>;

    /// Fetch a notification only if it belongs to the given user.
    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<Option<Notification>>;

    /// List a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        user_type: UserType,
        filter: NotificationFilter,
    ) -> NotificationResult<Vec<Notification>>;

    /// Count a user's unread notifications.
    async fn count_unread(&self, user_id: Uuid, user_type: UserType) -> NotificationResult<u64>;

    /// Flip the read flag on one notification.
    async fn mark_read(&self, id: Uuid) -> NotificationResult<Notification>;

    /// Mark all of a user's notifications read; returns how many changed.
    async fn mark_all_read(&self, user_id: Uuid, user_type: UserType) -> NotificationResult<u64>;

    /// Delete a notification; returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> NotificationResult<bool>;
}

/// Identity lookup and user enumeration, backed by the platform's user
/// stores (clients, artists, admins). Opaque to this subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user's email address, if they have one on file.
    async fn email_address(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<Option<String>>;

    /// All user ids of one type, for broadcast fanout.
    async fn user_ids(&self, user_type: UserType) -> NotificationResult<Vec<Uuid>>;
}
