//! In-app notification domain models.

use chrono::{DateTime, Utc};

use crate::model::notification::NotificationDto;

/// Category of a notification, stored as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    StatusChanged,
    ReviewAssigned,
    AuthorReviewRequested,
    IssuePublished,
    CorrectionPublished,
    PaymentExpired,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusChanged => "status_changed",
            Self::ReviewAssigned => "review_assigned",
            Self::AuthorReviewRequested => "author_review_requested",
            Self::IssuePublished => "issue_published",
            Self::CorrectionPublished => "correction_published",
            Self::PaymentExpired => "payment_expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub message: String,
    pub manuscript_id: Option<i32>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            message: entity.message,
            manuscript_id: entity.manuscript_id,
            read: entity.read,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind,
            message: self.message,
            manuscript_id: self.manuscript_id,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationParams {
    pub user_id: i32,
    pub kind: NotificationKind,
    pub message: String,
    pub manuscript_id: Option<i32>,
}
