//! Notification router: preference resolution, category gating, and
//! independent channel dispatch.
//!
//! This is a linear pipeline with a single branch point (the category
//! gate), not a state machine. Channel sends for one event run
//! concurrently and are joined before the outcome is aggregated.

use futures::future;
use inkq_email::{MailTransport, TemplateEngine};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::channels::{
    ChannelDispatcher, EmailDispatcher, InAppDispatcher, PushDispatcher, SmsDispatcher,
};
use crate::error::NotificationResult;
use crate::models::{ChannelOutcomes, DispatchEvent, DispatchOutcome};
use crate::preferences::PreferenceService;
use crate::repository::{NotificationRepository, PreferenceRepository, UserDirectory};

const CATEGORY_DISABLED_REASON: &str = "User has disabled this notification category";

/// Routes one event to the channels the recipient has enabled.
pub struct NotificationRouter<P: PreferenceRepository> {
    preferences: PreferenceService<P>,
    dispatchers: Vec<Arc<dyn ChannelDispatcher>>,
}

impl<P: PreferenceRepository> NotificationRouter<P> {
    /// Create a router over an explicit set of dispatchers.
    pub fn new(
        preferences: PreferenceService<P>,
        dispatchers: Vec<Arc<dyn ChannelDispatcher>>,
    ) -> Self {
        Self {
            preferences,
            dispatchers,
        }
    }

    /// Create a router wired with the four standard channels: in-app,
    /// email, and the push/SMS stubs.
    pub fn with_standard_channels<N, D>(
        preferences: PreferenceService<P>,
        notifications: Arc<N>,
        directory: Arc<D>,
        transport: Arc<dyn MailTransport>,
        templates: Arc<TemplateEngine>,
    ) -> Self
    where
        N: NotificationRepository + 'static,
        D: UserDirectory + 'static,
    {
        let dispatchers: Vec<Arc<dyn ChannelDispatcher>> = vec![
            Arc::new(InAppDispatcher::new(notifications)),
            Arc::new(EmailDispatcher::new(directory, transport, templates)),
            Arc::new(PushDispatcher),
            Arc::new(SmsDispatcher),
        ];
        Self::new(preferences, dispatchers)
    }

    /// Dispatch one event to one recipient.
    ///
    /// Returns `Err` only for malformed events and preference-store
    /// failures; channel-level failures are captured in the outcome.
    /// `sent` in the outcome means the category gate passed, independent
    /// of whether any individual channel delivered.
    #[instrument(
        skip(self, event),
        fields(
            user_id = %event.user_id,
            user_type = %event.user_type,
            category = %event.category,
        )
    )]
    pub async fn dispatch(&self, event: DispatchEvent) -> NotificationResult<DispatchOutcome> {
        event.validate()?;

        let preferences = self
            .preferences
            .get_or_create(event.user_id, event.user_type)
            .await?;

        if !preferences.category_enabled(event.category) {
            debug!("Category disabled, skipping all channels");
            return Ok(DispatchOutcome::gated(CATEGORY_DISABLED_REASON));
        }

        let enabled: Vec<_> = self
            .dispatchers
            .iter()
            .filter(|d| preferences.channel_enabled(d.channel()))
            .collect();

        let results =
            future::join_all(enabled.iter().map(|dispatcher| dispatcher.send(&event))).await;

        let mut channels = ChannelOutcomes::default();
        let mut notification = None;
        for result in results {
            if result.attempted && !result.succeeded {
                warn!(
                    channel = %result.channel,
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "Channel delivery failed"
                );
            }
            channels.record(result.channel, result.succeeded);
            if notification.is_none() {
                notification = result.notification;
            }
        }

        debug!(?channels, "Dispatch complete");

        Ok(DispatchOutcome {
            sent: true,
            reason: None,
            channels,
            notification,
        })
    }
}

impl<P: PreferenceRepository> Clone for NotificationRouter<P> {
    fn clone(&self) -> Self {
        Self {
            preferences: self.preferences.clone(),
            dispatchers: self.dispatchers.clone(),
        }
    }
}
