//! Manuscript factory for creating test manuscript entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test manuscripts with customizable fields.
///
/// Defaults to a freshly `submitted` research article from Germany with no
/// volume, issue or DOI.
pub struct ManuscriptFactory<'a> {
    db: &'a DatabaseConnection,
    submitter_id: i32,
    title: String,
    article_type: String,
    country: String,
    institution: String,
    status: String,
    copy_editing_stage: String,
    volume: Option<i32>,
    issue: Option<i32>,
    doi: Option<String>,
    published_date: Option<DateTime<Utc>>,
}

impl<'a> ManuscriptFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, submitter_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            submitter_id,
            title: format!("Manuscript {}", id),
            article_type: "research".to_string(),
            country: "DE".to_string(),
            institution: "University of Testing".to_string(),
            status: "submitted".to_string(),
            copy_editing_stage: "not_started".to_string(),
            volume: None,
            issue: None,
            doi: None,
            published_date: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn article_type(mut self, article_type: impl Into<String>) -> Self {
        self.article_type = article_type.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn copy_editing_stage(mut self, stage: impl Into<String>) -> Self {
        self.copy_editing_stage = stage.into();
        self
    }

    pub fn volume_issue(mut self, volume: i32, issue: i32) -> Self {
        self.volume = Some(volume);
        self.issue = Some(issue);
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn published_date(mut self, published_date: DateTime<Utc>) -> Self {
        self.published_date = Some(published_date);
        self
    }

    /// Builds and inserts the manuscript entity into the database.
    pub async fn build(self) -> Result<entity::manuscript::Model, DbErr> {
        let now = Utc::now();
        let authors = serde_json::json!([{
            "name": "Test Author",
            "email": "author@example.org",
            "affiliation": self.institution,
            "country": self.country,
            "corresponding": true,
        }]);

        entity::manuscript::ActiveModel {
            submitter_id: ActiveValue::Set(self.submitter_id),
            title: ActiveValue::Set(self.title),
            abstract_text: ActiveValue::Set("An abstract.".to_string()),
            article_type: ActiveValue::Set(self.article_type),
            authors: ActiveValue::Set(authors),
            country: ActiveValue::Set(self.country),
            institution: ActiveValue::Set(self.institution),
            file_url: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            copy_editing_stage: ActiveValue::Set(self.copy_editing_stage),
            volume: ActiveValue::Set(self.volume),
            issue: ActiveValue::Set(self.issue),
            doi: ActiveValue::Set(self.doi),
            published_date: ActiveValue::Set(self.published_date),
            views: ActiveValue::Set(0),
            downloads: ActiveValue::Set(0),
            citations: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a submitted manuscript with default values.
pub async fn create_manuscript(
    db: &DatabaseConnection,
    submitter_id: i32,
) -> Result<entity::manuscript::Model, DbErr> {
    ManuscriptFactory::new(db, submitter_id).build().await
}
