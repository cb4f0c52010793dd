//! Notifications Domain
//!
//! Notification dispatch and preference resolution for the Inkquiries
//! platform: given a recipient, an event, and that user's preference
//! record, decide which delivery channels to use and execute each one
//! independently.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    Controller    │  ← raises a DispatchEvent (review, comment, ...)
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │      Router      │  ← resolves preferences, gates by category
//! └────────┬─────────┘
//!          │ per enabled channel, concurrently
//!    ┌─────┴──────┬──────────┬─────────┐
//! ┌──▼───┐    ┌───▼───┐  ┌───▼──┐  ┌───▼──┐
//! │InApp │    │ Email │  │ Push │  │ SMS  │
//! └──┬───┘    └───┬───┘  └──────┘  └──────┘
//!    │            │        (stubs, preference-gated off)
//! ┌──▼───┐    ┌───▼───────┐
//! │ Store│    │ Transport │
//! └──────┘    └───────────┘
//! ```
//!
//! `Broadcaster` is a thin fanout loop over the router for system-wide
//! announcements. Persistence, identity lookup, user enumeration, and mail
//! transport are injected capabilities; the Postgres implementations in
//! [`postgres`] are one choice of backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifications::{
//!     DispatchEvent, NotificationRouter, PreferenceService,
//!     PgNotificationRepository, PgPreferenceRepository,
//! };
//!
//! let router = NotificationRouter::with_standard_channels(
//!     PreferenceService::new(PgPreferenceRepository::new(db.clone())),
//!     Arc::new(PgNotificationRepository::new(db)),
//!     directory,
//!     transport,
//!     templates,
//! );
//!
//! let outcome = router
//!     .dispatch(DispatchEvent::review_received(artist_id, review_id, 9))
//!     .await?;
//! ```

pub mod broadcast;
pub mod channels;
pub mod entity;
pub mod error;
pub mod events;
pub mod models;
pub mod postgres;
pub mod preferences;
pub mod repository;
pub mod router;
pub mod service;

// Re-export commonly used types
pub use broadcast::Broadcaster;
pub use channels::{
    ChannelDispatcher, EmailDispatcher, InAppDispatcher, PushDispatcher, SmsDispatcher,
};
pub use error::{NotificationError, NotificationResult};
pub use events::CommentTarget;
pub use models::{
    BroadcastRequest, BroadcastSummary, Category, Channel, ChannelOutcomes, ChannelResult,
    CreateNotification, DispatchEvent, DispatchOutcome, Notification, NotificationFilter,
    NotificationPreference, UNKNOWN_CATEGORY_POLICY, UpdatePreferences, UserType,
};
pub use postgres::{PgNotificationRepository, PgPreferenceRepository};
pub use preferences::PreferenceService;
pub use repository::{NotificationRepository, PreferenceRepository, UserDirectory};
pub use router::NotificationRouter;
pub use service::NotificationService;
