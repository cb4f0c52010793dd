//! Data models for the notifications domain.

use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Gating policy for categories the preference record carries no toggle for.
///
/// The platform has always sent notifications for unrecognized categories
/// (fail open). Kept as a named constant so the policy is explicit rather
/// than a silent `default` arm.
pub const UNKNOWN_CATEGORY_POLICY: bool = true;

/// The kind of account a notification is addressed to.
///
/// Together with the user id this forms the canonical recipient identity;
/// ids are `Uuid` everywhere, converted once at the boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "artist")]
    Artist,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// The semantic class of a notification, used for preference gating.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_category")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    #[sea_orm(string_value = "review")]
    Review,
    #[sea_orm(string_value = "comment")]
    Comment,
    #[sea_orm(string_value = "message")]
    Message,
    #[sea_orm(string_value = "system")]
    System,
    #[sea_orm(string_value = "promotion")]
    Promotion,
    #[sea_orm(string_value = "healed_photo")]
    HealedPhoto,
    /// A category this subsystem has no toggle for. Gated by
    /// [`UNKNOWN_CATEGORY_POLICY`].
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl Category {
    /// Parse a category string from an external caller, mapping anything
    /// unrecognized to [`Category::Unknown`] instead of failing.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or(Category::Unknown)
    }
}

/// A delivery mechanism.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    InApp,
    Email,
    Push,
    Sms,
}

/// Per-user, per-type notification toggles.
///
/// Exactly one record exists per (user_id, user_type) pair; it is created
/// lazily with defaults on first access and only ever updated by partial
/// merge, never deleted by this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    // Channel toggles. Push and SMS default off: those channels are stubs.
    pub in_app: bool,
    pub email: bool,
    pub push: bool,
    pub sms: bool,
    // Category toggles.
    pub review_notifications: bool,
    pub comment_notifications: bool,
    pub message_notifications: bool,
    pub system_notifications: bool,
    pub promotion_notifications: bool,
    pub healed_photo_reminders: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreference {
    /// Create the default preference record for a user.
    pub fn defaults(user_id: Uuid, user_type: UserType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            user_type,
            in_app: true,
            email: true,
            push: false,
            sms: false,
            review_notifications: true,
            comment_notifications: true,
            message_notifications: true,
            system_notifications: true,
            promotion_notifications: true,
            healed_photo_reminders: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether notifications of the given category should be sent at all.
    pub fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::Review => self.review_notifications,
            Category::Comment => self.comment_notifications,
            Category::Message => self.message_notifications,
            Category::System => self.system_notifications,
            Category::Promotion => self.promotion_notifications,
            Category::HealedPhoto => self.healed_photo_reminders,
            Category::Unknown => UNKNOWN_CATEGORY_POLICY,
        }
    }

    /// Whether the given delivery channel is enabled.
    pub fn channel_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::InApp => self.in_app,
            Channel::Email => self.email,
            Channel::Push => self.push,
            Channel::Sms => self.sms,
        }
    }

    /// Merge a partial update into this record.
    pub fn apply_update(&mut self, update: UpdatePreferences) {
        if let Some(in_app) = update.in_app {
            self.in_app = in_app;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(push) = update.push {
            self.push = push;
        }
        if let Some(sms) = update.sms {
            self.sms = sms;
        }
        if let Some(v) = update.review_notifications {
            self.review_notifications = v;
        }
        if let Some(v) = update.comment_notifications {
            self.comment_notifications = v;
        }
        if let Some(v) = update.message_notifications {
            self.message_notifications = v;
        }
        if let Some(v) = update.system_notifications {
            self.system_notifications = v;
        }
        if let Some(v) = update.promotion_notifications {
            self.promotion_notifications = v;
        }
        if let Some(v) = update.healed_photo_reminders {
            self.healed_photo_reminders = v;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for partially updating a preference record.
///
/// Unknown fields are rejected at deserialization rather than silently
/// dropped, so a typo in a toggle name surfaces as a 4xx at the boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePreferences {
    pub in_app: Option<bool>,
    pub email: Option<bool>,
    pub push: Option<bool>,
    pub sms: Option<bool>,
    pub review_notifications: Option<bool>,
    pub comment_notifications: Option<bool>,
    pub message_notifications: Option<bool>,
    pub system_notifications: Option<bool>,
    pub promotion_notifications: Option<bool>,
    pub healed_photo_reminders: Option<bool>,
}

/// A persisted in-app notification.
///
/// Immutable once created except for the `read` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    pub title: String,
    pub message: String,
    pub category: Category,
    pub action_link: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a notification record.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub title: String,
    pub message: String,
    pub category: Category,
    pub action_link: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Query filters for listing a user's notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationFilter {
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for NotificationFilter {
    fn default() -> Self {
        Self {
            unread_only: false,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// A single event to dispatch to one recipient.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub user_id: Uuid,
    pub user_type: UserType,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    pub category: Category,
    pub action_link: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl DispatchEvent {
    /// Create a new dispatch event.
    pub fn new(
        user_id: Uuid,
        user_type: UserType,
        title: impl Into<String>,
        message: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            user_id,
            user_type,
            title: title.into(),
            message: message.into(),
            category,
            action_link: None,
            metadata: None,
        }
    }

    /// Attach a call-to-action link.
    pub fn with_action_link(mut self, link: impl Into<String>) -> Self {
        self.action_link = Some(link.into());
        self
    }

    /// Attach opaque metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Result of one channel dispatcher invocation. Never an `Err`: delivery
/// failures are captured here so one channel cannot poison its siblings.
#[derive(Debug, Clone)]
pub struct ChannelResult {
    pub channel: Channel,
    /// Whether the dispatcher actually tried to deliver.
    pub attempted: bool,
    pub succeeded: bool,
    pub error: Option<String>,
    /// The persisted record, for the in-app channel.
    pub notification: Option<Notification>,
}

impl ChannelResult {
    /// A successful delivery.
    pub fn ok(channel: Channel) -> Self {
        Self {
            channel,
            attempted: true,
            succeeded: true,
            error: None,
            notification: None,
        }
    }

    /// A successful in-app delivery carrying the stored record.
    pub fn ok_with_notification(channel: Channel, notification: Notification) -> Self {
        Self {
            channel,
            attempted: true,
            succeeded: true,
            error: None,
            notification: Some(notification),
        }
    }

    /// An attempted delivery that failed.
    pub fn failed(channel: Channel, error: impl Into<String>) -> Self {
        Self {
            channel,
            attempted: true,
            succeeded: false,
            error: Some(error.into()),
            notification: None,
        }
    }

    /// A channel with no implementation behind it.
    pub fn not_implemented(channel: Channel) -> Self {
        Self {
            channel,
            attempted: false,
            succeeded: false,
            error: Some("not implemented".to_string()),
            notification: None,
        }
    }
}

/// Per-channel success flags in a dispatch outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelOutcomes {
    pub in_app: bool,
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl ChannelOutcomes {
    /// Record one channel's success flag.
    pub fn record(&mut self, channel: Channel, succeeded: bool) {
        match channel {
            Channel::InApp => self.in_app = succeeded,
            Channel::Email => self.email = succeeded,
            Channel::Push => self.push = succeeded,
            Channel::Sms => self.sms = succeeded,
        }
    }
}

/// Ephemeral result of one router invocation. Returned to the caller,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    /// True when the category gate passed, independent of per-channel
    /// delivery success.
    pub sent: bool,
    /// Why the dispatch was gated off, when `sent` is false.
    pub reason: Option<String>,
    pub channels: ChannelOutcomes,
    /// The in-app record, when that channel was enabled and the write
    /// succeeded.
    pub notification: Option<Notification>,
}

impl DispatchOutcome {
    /// The dispatch was gated off before any channel was invoked.
    pub fn gated(reason: impl Into<String>) -> Self {
        Self {
            sent: false,
            reason: Some(reason.into()),
            channels: ChannelOutcomes::default(),
            notification: None,
        }
    }
}

/// A platform-wide announcement to fan out.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    /// Category the fanned-out notifications carry; `None` means
    /// [`Category::System`].
    #[serde(default)]
    pub category: Option<Category>,
    pub action_link: Option<String>,
    /// Restrict the fanout to one user type; `None` targets everyone.
    pub target_user_type: Option<UserType>,
}

/// Accounting for one broadcast fanout.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BroadcastSummary {
    pub total_attempted: usize,
    pub total_sent: usize,
    pub total_failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let pref = NotificationPreference::defaults(Uuid::new_v4(), UserType::Artist);

        assert!(pref.in_app);
        assert!(pref.email);
        assert!(!pref.push);
        assert!(!pref.sms);
        assert!(pref.review_notifications);
        assert!(pref.comment_notifications);
        assert!(pref.message_notifications);
        assert!(pref.system_notifications);
        assert!(pref.promotion_notifications);
        assert!(pref.healed_photo_reminders);
    }

    #[test]
    fn unknown_category_fails_open() {
        let mut pref = NotificationPreference::defaults(Uuid::new_v4(), UserType::Client);
        // Disable everything with a toggle; the unknown category is still sent.
        pref.apply_update(UpdatePreferences {
            review_notifications: Some(false),
            comment_notifications: Some(false),
            message_notifications: Some(false),
            system_notifications: Some(false),
            promotion_notifications: Some(false),
            healed_photo_reminders: Some(false),
            ..Default::default()
        });

        assert!(!pref.category_enabled(Category::Review));
        assert_eq!(
            pref.category_enabled(Category::Unknown),
            UNKNOWN_CATEGORY_POLICY
        );
    }

    #[test]
    fn category_parse_lossy() {
        assert_eq!(Category::parse_lossy("review"), Category::Review);
        assert_eq!(Category::parse_lossy("healed_photo"), Category::HealedPhoto);
        assert_eq!(Category::parse_lossy("carrier_pigeon"), Category::Unknown);
    }

    #[test]
    fn apply_update_merges_partially() {
        let mut pref = NotificationPreference::defaults(Uuid::new_v4(), UserType::Client);
        let before = pref.clone();

        pref.apply_update(UpdatePreferences {
            email: Some(false),
            ..Default::default()
        });

        assert!(!pref.email);
        assert_eq!(pref.in_app, before.in_app);
        assert_eq!(pref.review_notifications, before.review_notifications);
        assert!(pref.updated_at >= before.updated_at);
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let result: Result<UpdatePreferences, _> =
            serde_json::from_str(r#"{"email": false, "carrier_pigeon": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn event_validation() {
        let ok = DispatchEvent::new(
            Uuid::new_v4(),
            UserType::Artist,
            "New Review",
            "You received a new review.",
            Category::Review,
        );
        assert!(validator::Validate::validate(&ok).is_ok());

        let empty_title =
            DispatchEvent::new(Uuid::new_v4(), UserType::Artist, "", "msg", Category::Review);
        assert!(validator::Validate::validate(&empty_title).is_err());
    }
}
