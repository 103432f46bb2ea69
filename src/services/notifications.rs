use crate::db::DbPool;
use crate::entities::notification::{self, Entity as Notification};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

const MAX_NOTIFICATIONS: u64 = 100;

/// Notification about to be written for a user
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub metadata: Option<Value>,
}

/// Inserts a notification on any connection, including an open transaction.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    new: NewNotification,
) -> Result<notification::Model, ServiceError> {
    let row = notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        notification_type: Set(new.notification_type),
        title: Set(new.title),
        message: Set(new.message),
        metadata: Set(new.metadata),
        read: Set(false),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    debug!(user_id = %row.user_id, kind = %row.notification_type, "notification recorded");
    Ok(row)
}

#[derive(Clone)]
pub struct NotificationService {
    db: Arc<DbPool>,
}

impl NotificationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Get notifications for a user, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<notification::Model>, ServiceError> {
        let mut query = Notification::find().filter(notification::Column::UserId.eq(user_id));
        if unread_only {
            query = query.filter(notification::Column::Read.eq(false));
        }
        Ok(query
            .order_by_desc(notification::Column::CreatedAt)
            .limit(MAX_NOTIFICATIONS)
            .all(&*self.db)
            .await?)
    }

    /// Mark a notification as read or unread; only its owner may do so
    #[instrument(skip(self))]
    pub async fn set_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        read: bool,
    ) -> Result<notification::Model, ServiceError> {
        let existing = Notification::find_by_id(notification_id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("notification", notification_id))?;

        let mut active: notification::ActiveModel = existing.into();
        active.read = Set(read);
        Ok(active.update(&*self.db).await?)
    }
}
