//! Correction factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test corrections attached to a manuscript.
pub struct CorrectionFactory<'a> {
    db: &'a DatabaseConnection,
    manuscript_id: i32,
    created_by: i32,
    kind: String,
    status: String,
    doi: Option<String>,
    published_date: Option<DateTime<Utc>>,
}

impl<'a> CorrectionFactory<'a> {
    /// Defaults to a draft erratum with no DOI.
    pub fn new(db: &'a DatabaseConnection, manuscript_id: i32, created_by: i32) -> Self {
        Self {
            db,
            manuscript_id,
            created_by,
            kind: "erratum".to_string(),
            status: "draft".to_string(),
            doi: None,
            published_date: None,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Marks the correction as published with the given DOI and date.
    pub fn published(mut self, doi: impl Into<String>, published_date: DateTime<Utc>) -> Self {
        self.status = "published".to_string();
        self.doi = Some(doi.into());
        self.published_date = Some(published_date);
        self
    }

    pub async fn build(self) -> Result<entity::correction::Model, DbErr> {
        entity::correction::ActiveModel {
            manuscript_id: ActiveValue::Set(self.manuscript_id),
            kind: ActiveValue::Set(self.kind),
            description: ActiveValue::Set("Corrected figure 2 caption.".to_string()),
            doi: ActiveValue::Set(self.doi),
            status: ActiveValue::Set(self.status),
            published_date: ActiveValue::Set(self.published_date),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a draft correction with default values.
pub async fn create_correction(
    db: &DatabaseConnection,
    manuscript_id: i32,
    created_by: i32,
) -> Result<entity::correction::Model, DbErr> {
    CorrectionFactory::new(db, manuscript_id, created_by)
        .build()
        .await
}
