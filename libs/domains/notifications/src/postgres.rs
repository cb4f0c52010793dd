//! Postgres implementations of the persistence traits.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::{notification, preference};
use crate::error::{NotificationError, NotificationResult};
use crate::models::{
    CreateNotification, Notification, NotificationFilter, NotificationPreference, UserType,
};
use crate::repository::{NotificationRepository, PreferenceRepository};

/// Preference store backed by Postgres.
pub struct PgPreferenceRepository {
    db: DatabaseConnection,
}

impl PgPreferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn find(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<Option<NotificationPreference>> {
        let model = preference::Entity::find()
            .filter(preference::Column::UserId.eq(user_id))
            .filter(preference::Column::UserType.eq(user_type))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn create(
        &self,
        pref: NotificationPreference,
    ) -> NotificationResult<NotificationPreference> {
        let user_id = pref.user_id;
        let user_type = pref.user_type;
        let active: preference::ActiveModel = pref.into();

        // Concurrent first-access race: whoever loses the insert re-reads
        // the winner's row. Defaults are identical either way.
        let insert = preference::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([preference::Column::UserId, preference::Column::UserType])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match insert {
            Ok(_) => {}
            Err(DbErr::RecordNotInserted) => {
                debug!(
                    user_id = %user_id,
                    user_type = %user_type,
                    "Preference row already exists, re-fetching"
                );
            }
            Err(e) => return Err(e.into()),
        }

        self.find(user_id, user_type).await?.ok_or_else(|| {
            NotificationError::Internal(format!(
                "preference row missing after upsert for {} {}",
                user_type, user_id
            ))
        })
    }

    async fn save(
        &self,
        pref: NotificationPreference,
    ) -> NotificationResult<NotificationPreference> {
        let active: preference::ActiveModel = pref.into();
        let model = active.update(&self.db).await?;
        Ok(model.into())
    }
}

/// Notification store backed by Postgres.
pub struct PgNotificationRepository {
    db: DatabaseConnection,
}

impl PgNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification> {
        let active: notification::ActiveModel = input.into();
        let model = active.insert(&self.db).await?;

        debug!(notification_id = %model.id, "Inserted notification");
        Ok(model.into())
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
        user_type: UserType,
    ) -> NotificationResult<Option<Notification>> {
        let model = notification::Entity::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::UserType.eq(user_type))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        user_type: UserType,
        filter: NotificationFilter,
    ) -> NotificationResult<Vec<Notification>> {
        let mut query = notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::UserType.eq(user_type));

        if filter.unread_only {
            query = query.filter(notification::Column::Read.eq(false));
        }

        let models = query
            .order_by_desc(notification::Column::CreatedAt)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_unread(&self, user_id: Uuid, user_type: UserType) -> NotificationResult<u64> {
        let count = notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::UserType.eq(user_type))
            .filter(notification::Column::Read.eq(false))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn mark_read(&self, id: Uuid) -> NotificationResult<Notification> {
        let model = notification::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        let mut active: notification::ActiveModel = model.into();
        active.read = Set(true);
        let updated = active.update(&self.db).await?;

        Ok(updated.into())
    }

    async fn mark_all_read(&self, user_id: Uuid, user_type: UserType) -> NotificationResult<u64> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::UserType.eq(user_type))
            .filter(notification::Column::Read.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> NotificationResult<bool> {
        let result = notification::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
