//! In-app notifications.
//!
//! Notifications are only stored; there is no e-mail delivery.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::{CreateNotificationParams, Notification, NotificationKind},
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a notification for a user.
    pub async fn notify(
        &self,
        user_id: i32,
        kind: NotificationKind,
        message: String,
        manuscript_id: Option<i32>,
    ) -> Result<Notification, AppError> {
        let repo = NotificationRepository::new(self.db);

        let notification = repo
            .create(&CreateNotificationParams {
                user_id,
                kind,
                message,
                manuscript_id,
            })
            .await?;

        tracing::debug!(
            "Notified user {} ({})",
            user_id,
            notification.kind
        );

        Ok(Notification::from_entity(notification))
    }

    /// Lists a user's notifications, newest first.
    pub async fn get_for_user(
        &self,
        user_id: i32,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let repo = NotificationRepository::new(self.db);

        let notifications = repo
            .get_by_user(user_id, unread_only)
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect();

        Ok(notifications)
    }

    /// Marks one of the user's notifications read.
    ///
    /// # Returns
    /// - `Ok(())` - Notification marked read
    /// - `Err(AppError::NotFound)` - No such notification for this user
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = NotificationRepository::new(self.db);

        if !repo.mark_read(id, user_id).await? {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}
