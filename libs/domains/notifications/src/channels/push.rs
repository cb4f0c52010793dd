//! Push channel stub.
//!
//! Push delivery is not implemented. The channel defaults off in
//! preferences, so the router normally never invokes this; if it is
//! invoked anyway it reports a not-implemented result instead of failing.

use async_trait::async_trait;

use super::ChannelDispatcher;
use crate::models::{Channel, ChannelResult, DispatchEvent};

pub struct PushDispatcher;

#[async_trait]
impl ChannelDispatcher for PushDispatcher {
    fn channel(&self) -> Channel {
        Channel::Push
    }

    async fn send(&self, _event: &DispatchEvent) -> ChannelResult {
        ChannelResult::not_implemented(Channel::Push)
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
        let result = PushDispatcher.send(&event).await;

        assert!(!result.attempted);
        assert!(!result.succeeded);
        assert_eq!(result.error.as_deref(), Some("not implemented"));
    }
}
