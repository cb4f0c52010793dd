//! SMS channel stub.
//!
//! Same contract as the push stub: never invoked under default preferences,
//! and a safe, clearly-marked no-op if it is.

use async_trait::async_trait;

use super::ChannelDispatcher;
use crate::models::{Channel, ChannelResult, DispatchEvent};

pub struct SmsDispatcher;

#[async_trait]
impl ChannelDispatcher for SmsDispatcher {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    async fn send(&self, _event: &DispatchEvent) -> ChannelResult {
        ChannelResult::not_implemented(Channel::Sms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, UserType};
    use uuid::Uuid;

    #[tokio::test]
    async fn is_a_marked_noop() {
        let event = DispatchEvent::new(
            Uuid::new_v4(),
            UserType::Client,
            "t",
            "m",
            Category::System,
        );
        let result = SmsDispatcher.send(&event).await;

        assert!(!result.attempted);
        assert!(!result.succeeded);
        assert_eq!(result.error.as_deref(), Some("not implemented"));
    }
}
