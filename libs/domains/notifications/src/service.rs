//! User-facing operations on stored notifications.
//!
//! The operations behind the notification screens: listing, unread counts,
//! marking read, and deletion. Every mutating operation is scoped to the
//! owning (user_id, user_type) so one user cannot touch another's rows.

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{NotificationError, NotificationResult};
use crate::models::{Notification, NotificationFilter, UserType};
use crate::repository::NotificationRepository;

/// Service layer over the notification store.
pub struct NotificationService<N: NotificationRepository> {
    repository: Arc<N>,
}

impl<N: NotificationRepository> Clone for NotificationService<N> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<N: NotificationRepository> NotificationService<N> {
    pub fn new(repository: N) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn with_arc(repository: Arc<N>) -> Self {
        Self { repository }
    }

    /// List a user's notifications, newest first.
    pub async fn list(
        &self,
        user_id: Uuid,
        user_type: UserType,
        filter: NotificationFilter,
    ) -> NotificationResult<Vec<Notification>> {
        self.repository
            .list_for_user(user_id, user_type, filter)
            .await
    }

    /// Count a user's unread notifications.
    pub async fn unread_count(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<u64> {
        self.repository.count_unread(user_id, user_type).await
    }

    /// Mark one notification read, if it belongs to the given user.
    #[instrument(skip(self), fields(notification_id = %id, user_id = %user_id))]
    pub async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<Notification> {
        let existing = self
            .repository
            .find_for_user(id, user_id, user_type)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        if existing.read {
            return Ok(existing);
        }

        self.repository.mark_read(id).await
    }

    /// Mark all of a user's notifications read; returns how many changed.
    #[instrument(skip(self), fields(user_id = %user_id, user_type = %user_type))]
    pub async fn mark_all_read(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<u64> {
        let changed = self.repository.mark_all_read(user_id, user_type).await?;
        info!(changed, "Marked all notifications read");
        Ok(changed)
    }

    /// Delete one notification, if it belongs to the given user.
    #[instrument(skip(self), fields(notification_id = %id, user_id = %user_id))]
    pub async fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<()> {
        self.repository
            .find_for_user(id, user_id, user_type)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(NotificationError::NotFound(id));
        }

        info!("Deleted notification");
        Ok(())
    }
}
