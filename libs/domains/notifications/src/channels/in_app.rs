//! In-app channel: persists a notification record.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use super::ChannelDispatcher;
use crate::models::{Channel, ChannelResult, CreateNotification, DispatchEvent};
use crate::repository::NotificationRepository;

/// Dispatcher that stores a `Notification` row for the recipient.
pub struct InAppDispatcher<N: NotificationRepository> {
    notifications: Arc<N>,
}

impl<N: NotificationRepository> InAppDispatcher<N> {
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl<N: NotificationRepository> ChannelDispatcher for InAppDispatcher<N> {
    fn channel(&self) -> Channel {
        Channel::InApp
    }

    async fn send(&self, event: &DispatchEvent) -> ChannelResult {
        let input = CreateNotification {
            user_id: event.user_id,
            user_type: event.user_type,
            title: event.title.clone(),
            message: event.message.clone(),
            category: event.category,
            action_link: event.action_link.clone(),
            metadata: event.metadata.clone(),
        };

        match self.notifications.create(input).await {
            Ok(notification) => {
                debug!(
                    notification_id = %notification.id,
                    user_id = %event.user_id,
                    "Stored in-app notification"
                );
                ChannelResult::ok_with_notification(Channel::InApp, notification)
            }
            Err(e) => {
                error!(user_id = %event.user_id, error = %e, "In-app notification write failed");
                ChannelResult::failed(Channel::InApp, e.to_string())
            }
        }
    }
}
