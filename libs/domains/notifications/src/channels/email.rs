//! Email channel: resolves the recipient's address, renders the notification
//! template, and hands the message to the mail transport.

use async_trait::async_trait;
use inkq_email::{Email, MailTransport, NotificationEmailData, TemplateEngine};
use std::sync::Arc;
use tracing::{debug, warn};

use super::ChannelDispatcher;
use crate::models::{Channel, ChannelResult, DispatchEvent};
use crate::repository::UserDirectory;

/// Dispatcher that delivers notifications by email.
pub struct EmailDispatcher<D: UserDirectory> {
    directory: Arc<D>,
    transport: Arc<dyn MailTransport>,
    templates: Arc<TemplateEngine>,
}

impl<D: UserDirectory> EmailDispatcher<D> {
    pub fn new(
        directory: Arc<D>,
        transport: Arc<dyn MailTransport>,
        templates: Arc<TemplateEngine>,
    ) -> Self {
        Self {
            directory,
            transport,
            templates,
        }
    }
}

#[async_trait]
impl<D: UserDirectory> ChannelDispatcher for EmailDispatcher<D> {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, event: &DispatchEvent) -> ChannelResult {
        // Address lookup failures are channel failures, not dispatch failures.
        let address = match self
            .directory
            .email_address(event.user_id, event.user_type)
            .await
        {
            Ok(Some(address)) => address,
            Ok(None) => {
                warn!(
                    user_id = %event.user_id,
                    user_type = %event.user_type,
                    "No email address on file"
                );
                return ChannelResult::failed(Channel::Email, "no address");
            }
            Err(e) => {
                warn!(user_id = %event.user_id, error = %e, "Email address lookup failed");
                return ChannelResult::failed(Channel::Email, e.to_string());
            }
        };

        let data = NotificationEmailData::new(
            event.title.clone(),
            event.message.clone(),
            event.action_link.clone(),
        );

        let rendered = match self.templates.render_notification(&data) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!(user_id = %event.user_id, error = %e, "Notification email render failed");
                return ChannelResult::failed(Channel::Email, e.to_string());
            }
        };

        let email = Email::new(address.clone(), rendered.subject)
            .with_html(rendered.html)
            .with_text(rendered.text);

        match self.transport.send(&email).await {
            Ok(result) => {
                debug!(
                    to = %address,
                    message_id = %result.message_id,
                    "Notification email sent"
                );
                ChannelResult::ok(Channel::Email)
            }
            Err(e) => {
                warn!(to = %address, error = %e, "Notification email send failed");
                ChannelResult::failed(Channel::Email, e.to_string())
            }
        }
    }
}
