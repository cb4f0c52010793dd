//! Sea-ORM entities for the notification tables.

/// `notification_preferences` table. Uniqueness of (user_id, user_type) is
/// enforced by a database constraint; the repository relies on it for the
/// create-if-absent upsert.
pub mod preference {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    use crate::models::{NotificationPreference, UserType};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "notification_preferences")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub user_type: UserType,
        pub in_app: bool,
        pub email: bool,
        pub push: bool,
        pub sms: bool,
        pub review_notifications: bool,
        pub comment_notifications: bool,
        pub message_notifications: bool,
        pub system_notifications: bool,
        pub promotion_notifications: bool,
        pub healed_photo_reminders: bool,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for NotificationPreference {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                user_id: model.user_id,
                user_type: model.user_type,
                in_app: model.in_app,
                email: model.email,
                push: model.push,
                sms: model.sms,
                review_notifications: model.review_notifications,
                comment_notifications: model.comment_notifications,
                message_notifications: model.message_notifications,
                system_notifications: model.system_notifications,
                promotion_notifications: model.promotion_notifications,
                healed_photo_reminders: model.healed_photo_reminders,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<NotificationPreference> for ActiveModel {
        fn from(pref: NotificationPreference) -> Self {
            ActiveModel {
                id: Set(pref.id),
                user_id: Set(pref.user_id),
                user_type: Set(pref.user_type),
                in_app: Set(pref.in_app),
                email: Set(pref.email),
                push: Set(pref.push),
                sms: Set(pref.sms),
                review_notifications: Set(pref.review_notifications),
                comment_notifications: Set(pref.comment_notifications),
                message_notifications: Set(pref.message_notifications),
                system_notifications: Set(pref.system_notifications),
                promotion_notifications: Set(pref.promotion_notifications),
                healed_photo_reminders: Set(pref.healed_photo_reminders),
                created_at: Set(pref.created_at.into()),
                updated_at: Set(pref.updated_at.into()),
            }
        }
    }
}

/// `notifications` table.
pub mod notification {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    use crate::models::{Category, CreateNotification, Notification, UserType};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "notifications")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub user_type: UserType,
        pub title: String,
        #[sea_orm(column_type = "Text")]
        pub message: String,
        pub category: Category,
        pub action_link: Option<String>,
        pub metadata: Option<Json>,
        pub read: bool,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for Notification {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                user_id: model.user_id,
                user_type: model.user_type,
                title: model.title,
                message: model.message,
                category: model.category,
                action_link: model.action_link,
                metadata: model.metadata,
                read: model.read,
                created_at: model.created_at.into(),
            }
        }
    }

    impl From<CreateNotification> for ActiveModel {
        fn from(input: CreateNotification) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(input.user_id),
                user_type: Set(input.user_type),
                title: Set(input.title),
                message: Set(input.message),
                category: Set(input.category),
                action_link: Set(input.action_link),
                metadata: Set(input.metadata),
                read: Set(false),
                created_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}
