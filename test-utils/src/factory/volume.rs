//! Volume and issue factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test volumes.
pub struct VolumeFactory<'a> {
    db: &'a DatabaseConnection,
    number: i32,
    year: i32,
}

impl<'a> VolumeFactory<'a> {
    /// Defaults to a unique volume number below 100 in year 2025.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            number: (next_id() % 99 + 1) as i32,
            year: 2025,
        }
    }

    pub fn number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub async fn build(self) -> Result<entity::volume::Model, DbErr> {
        entity::volume::ActiveModel {
            number: ActiveValue::Set(self.number),
            year: ActiveValue::Set(self.year),
            title: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Factory for creating test issues within a volume.
pub struct IssueFactory<'a> {
    db: &'a DatabaseConnection,
    volume_id: i32,
    number: i32,
    status: String,
}

impl<'a> IssueFactory<'a> {
    /// Defaults to draft issue number 1.
    pub fn new(db: &'a DatabaseConnection, volume_id: i32) -> Self {
        Self {
            db,
            volume_id,
            number: 1,
            status: "draft".to_string(),
        }
    }

    pub fn number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::issue::Model, DbErr> {
        entity::issue::ActiveModel {
            volume_id: ActiveValue::Set(self.volume_id),
            number: ActiveValue::Set(self.number),
            title: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            published_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a volume with the given number in 2025.
pub async fn create_volume(
    db: &DatabaseConnection,
    number: i32,
) -> Result<entity::volume::Model, DbErr> {
    VolumeFactory::new(db).number(number).build().await
}

/// Creates a draft issue in the given volume.
pub async fn create_issue(
    db: &DatabaseConnection,
    volume_id: i32,
    number: i32,
) -> Result<entity::issue::Model, DbErr> {
    IssueFactory::new(db, volume_id).number(number).build().await
}
