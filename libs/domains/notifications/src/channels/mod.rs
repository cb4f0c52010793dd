//! Channel dispatchers.
//!
//! Each delivery channel is an independent sender behind the
//! `ChannelDispatcher` trait. Dispatchers never return errors: a failure is
//! captured inside the `ChannelResult` so one channel going down (say, the
//! mail server) cannot keep a sibling channel from delivering.

mod email;
mod in_app;
mod push;
mod sms;

pub use email::EmailDispatcher;
pub use in_app::InAppDispatcher;
pub use push::PushDispatcher;
pub use sms::SmsDispatcher;

use async_trait::async_trait;

use crate::models::{Channel, ChannelResult, DispatchEvent};

/// One delivery channel.
#[async_trait]
pub trait ChannelDispatcher: Send + Sync {
    /// Which channel this dispatcher serves.
    fn channel(&self) -> Channel;

    /// Deliver the event through this channel. Infallible by contract;
    /// failures are reported inside the result.
    async fn send(&self, event: &DispatchEvent) -> ChannelResult;
}
