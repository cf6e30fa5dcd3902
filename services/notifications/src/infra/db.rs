use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

use domus_notifications_schema::notifications;

use crate::domain::repository::{NotificationChange, NotificationRepository};
use crate::domain::types::{Notification, NotificationStatus, Priority};
use crate::domain::visibility::{FeedQuery, Predicate, StatusFilter};
use crate::error::NotificationsServiceError;

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

impl NotificationRepository for DbNotificationRepository {
    async fn list(
        &self,
        query: &FeedQuery,
    ) -> Result<Vec<Notification>, NotificationsServiceError> {
        let mut condition = Condition::all().add(predicate_condition(&query.predicate));
        condition = match query.status {
            StatusFilter::ExcludeArchived => condition.add(
                notifications::Column::Status.ne(NotificationStatus::Archived.as_str()),
            ),
            StatusFilter::Only(status) => {
                condition.add(notifications::Column::Status.eq(status.as_str()))
            }
        };
        if let Some(priority) = query.priority {
            condition = condition.add(notifications::Column::Priority.eq(priority.as_str()));
        }

        let models = notifications::Entity::find()
            .filter(condition)
            .order_by_desc(notifications::Column::CreatedAt)
            .limit(query.limit)
            .all(&self.db)
            .await
            .context("list notifications")?;
        Ok(models.into_iter().map(notification_from_model).collect())
    }

    async fn insert(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationsServiceError> {
        notifications::ActiveModel {
            id: Set(notification.id),
            title: Set(notification.title.clone()),
            message: Set(notification.message.clone()),
            icon: Set(notification.icon.clone()),
            priority: Set(notification.priority.as_str().to_owned()),
            status: Set(notification.status.as_str().to_owned()),
            notification_type: Set(notification.notification_type.clone()),
            source_table: Set(notification.source_table.clone()),
            source_table_display_name: Set(notification.source_table_display_name.clone()),
            source_record_id: Set(notification.source_record_id.clone()),
            data: Set(notification.data.clone()),
            action_url: Set(notification.action_url.clone()),
            recipient_role: Set(notification.recipient_role.clone()),
            recipient_id: Set(notification.recipient_id),
            created_at: Set(notification.created_at),
            updated_at: Set(notification.updated_at),
            read_at: Set(notification.read_at),
        }
        .insert(&self.db)
        .await
        .context("insert notification")?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Notification>, NotificationsServiceError> {
        let model = notifications::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find notification by id")?;
        Ok(model.map(notification_from_model))
    }

    async fn update(
        &self,
        id: Uuid,
        change: &NotificationChange,
    ) -> Result<Option<Notification>, NotificationsServiceError> {
        let mut am = notifications::ActiveModel {
            id: Set(id),
            updated_at: Set(change.updated_at),
            ..Default::default()
        };
        if let Some(status) = change.status {
            am.status = Set(status.as_str().to_owned());
        }
        if let Some(read_at) = change.read_at {
            am.read_at = Set(Some(read_at));
        }

        match am.update(&self.db).await {
            Ok(model) => Ok(Some(notification_from_model(model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context("update notification")
                .into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, NotificationsServiceError> {
        let result = notifications::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete notification")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, NotificationsServiceError> {
        let result = notifications::Entity::delete_many()
            .exec(&self.db)
            .await
            .context("clear notifications")?;
        Ok(result.rows_affected)
    }
}

/// Translate the targeting predicate into a sea-orm `Condition`.
///
/// Must stay behaviourally identical to `Predicate::matches`; the
/// visibility unit tests are the reference semantics.
fn predicate_condition(predicate: &Predicate) -> Condition {
    match predicate {
        Predicate::All => Condition::all(),
        Predicate::RecipientRoleIs(role) => {
            Condition::all().add(notifications::Column::RecipientRole.eq(role.as_str()))
        }
        Predicate::RecipientRoleNotNull => {
            Condition::all().add(notifications::Column::RecipientRole.is_not_null())
        }
        Predicate::RecipientIdIs(id) => {
            Condition::all().add(notifications::Column::RecipientId.eq(*id))
        }
        // data ->> 'user_id' yields text; producers send numbers and
        // numeric strings, both of which extract to the same text form.
        // The value is bound, not interpolated.
        Predicate::DataUserIdIs(id) => Condition::all().add(Expr::cust_with_values(
            "data ->> 'user_id' = ?",
            [id.to_string()],
        )),
        Predicate::AnyOf(ps) => ps
            .iter()
            .fold(Condition::any(), |c, p| c.add(predicate_condition(p))),
        Predicate::AllOf(ps) => ps
            .iter()
            .fold(Condition::all(), |c, p| c.add(predicate_condition(p))),
    }
}

fn notification_from_model(model: notifications::Model) -> Notification {
    Notification {
        id: model.id,
        title: model.title,
        message: model.message,
        icon: model.icon,
        priority: Priority::parse(&model.priority).unwrap_or_default(),
        status: NotificationStatus::parse(&model.status).unwrap_or(NotificationStatus::Unread),
        notification_type: model.notification_type,
        source_table: model.source_table,
        source_table_display_name: model.source_table_display_name,
        source_record_id: model.source_record_id,
        data: model.data,
        action_url: model.action_url,
        recipient_role: model.recipient_role,
        recipient_id: model.recipient_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        read_at: model.read_at,
    }
}
