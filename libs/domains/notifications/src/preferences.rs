//! Preference store: lazy creation with defaults and partial-merge updates.

use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::NotificationResult;
use crate::models::{NotificationPreference, UpdatePreferences, UserType};
use crate::repository::PreferenceRepository;

/// Service owning `NotificationPreference` records.
pub struct PreferenceService<R: PreferenceRepository> {
    repository: Arc<R>,
}

impl<R: PreferenceRepository> Clone for PreferenceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: PreferenceRepository> PreferenceService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn with_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch the preference record for a user, creating it with defaults on
    /// first access.
    #[instrument(skip(self), fields(user_id = %user_id, user_type = %user_type))]
    pub async fn get_or_create(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<NotificationPreference> {
        if let Some(preference) = self.repository.find(user_id, user_type).await? {
            return Ok(preference);
        }

        debug!("No preference record, creating defaults");
        let created = self
            .repository
            .create(NotificationPreference::defaults(user_id, user_type))
            .await?;

        info!(preference_id = %created.id, "Created default notification preferences");
        Ok(created)
    }

    /// Merge a partial update into the user's record, creating it with
    /// defaults first if absent.
    #[instrument(skip(self, update), fields(user_id = %user_id, user_type = %user_type))]
    pub async fn update(
        &self,
        user_id: Uuid,
        user_type: UserType,
        update: UpdatePreferences,
    ) -> NotificationResult<NotificationPreference> {
        let mut preference = self.get_or_create(user_id, user_type).await?;
        preference.apply_update(update);

        let saved = self.repository.save(preference).await?;
        info!(preference_id = %saved.id, "Updated notification preferences");
        Ok(saved)
    }
}
