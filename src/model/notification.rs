use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub kind: String,
    pub message: String,
    pub manuscript_id: Option<i32>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
