use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::notification::CreateNotificationParams;

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: &CreateNotificationParams,
    ) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            message: ActiveValue::Set(params.message.clone()),
            manuscript_id: ActiveValue::Set(params.manuscript_id),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets a user's notifications, newest first.
    pub async fn get_by_user(
        &self,
        user_id: i32,
        unread_only: bool,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(entity::notification::Column::Read.eq(false));
        }

        query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .all(self.db)
            .await
    }

    /// Marks a notification read if it belongs to the user.
    ///
    /// # Returns
    /// - `Ok(true)` - Notification marked read
    /// - `Ok(false)` - No such notification for this user
    /// - `Err(DbErr)` - Database error
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(
                entity::notification::Column::Read,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
