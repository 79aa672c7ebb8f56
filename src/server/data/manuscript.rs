//! Manuscript data repository.
//!
//! Provides `ManuscriptRepository` for submissions, workflow state updates, issue
//! assignment, DOI assignment and article metrics.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

use crate::{
    model::manuscript::{CopyEditingStage, ManuscriptStatus, MetricKind},
    server::model::manuscript::{CreateManuscriptParams, ManuscriptFilter},
};

pub struct ManuscriptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ManuscriptRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new submission with status `submitted` and copy-editing not started.
    ///
    /// # Arguments
    /// - `params` - Validated submission parameters
    ///
    /// # Returns
    /// - `Ok(Model)` - The created manuscript
    /// - `Err(DbErr)` - Database error, or the authors list failed to serialize
    pub async fn create(
        &self,
        params: &CreateManuscriptParams,
    ) -> Result<entity::manuscript::Model, DbErr> {
        let authors =
            serde_json::to_value(&params.authors).map_err(|e| DbErr::Json(e.to_string()))?;
        let now = Utc::now();

        entity::manuscript::ActiveModel {
            submitter_id: ActiveValue::Set(params.submitter_id),
            title: ActiveValue::Set(params.title.clone()),
            abstract_text: ActiveValue::Set(params.abstract_text.clone()),
            article_type: ActiveValue::Set(params.article_type.clone()),
            authors: ActiveValue::Set(authors),
            country: ActiveValue::Set(params.country.clone()),
            institution: ActiveValue::Set(params.institution.clone()),
            file_url: ActiveValue::Set(params.file_url.clone()),
            status: ActiveValue::Set(ManuscriptStatus::Submitted.as_str().to_string()),
            copy_editing_stage: ActiveValue::Set(CopyEditingStage::NotStarted.as_str().to_string()),
            volume: ActiveValue::Set(None),
            issue: ActiveValue::Set(None),
            doi: ActiveValue::Set(None),
            published_date: ActiveValue::Set(None),
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

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::manuscript::Model>, DbErr> {
        entity::prelude::Manuscript::find_by_id(id).one(self.db).await
    }

    /// Gets manuscripts matching a filter, newest first.
    ///
    /// # Returns
    /// - `Ok((manuscripts, total))` - The requested page and the total number of matches
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: &ManuscriptFilter,
    ) -> Result<(Vec<entity::manuscript::Model>, u64), DbErr> {
        let mut query = entity::prelude::Manuscript::find();

        if let Some(submitter_id) = filter.submitter_id {
            query = query.filter(entity::manuscript::Column::SubmitterId.eq(submitter_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::manuscript::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::manuscript::Column::CreatedAt)
            .order_by_desc(entity::manuscript::Column::Id)
            .paginate(self.db, filter.per_page);

        let total = paginator.num_items().await?;
        let manuscripts = paginator.fetch_page(filter.page).await?;

        Ok((manuscripts, total))
    }

    /// Gets every manuscript assigned to a volume and issue.
    pub async fn find_by_issue(
        &self,
        volume: i32,
        issue: i32,
    ) -> Result<Vec<entity::manuscript::Model>, DbErr> {
        entity::prelude::Manuscript::find()
            .filter(entity::manuscript::Column::Volume.eq(volume))
            .filter(entity::manuscript::Column::Issue.eq(issue))
            .order_by_asc(entity::manuscript::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: ManuscriptStatus,
    ) -> Result<entity::manuscript::Model, DbErr> {
        entity::manuscript::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(status.as_str().to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    pub async fn update_copy_editing_stage(
        &self,
        id: i32,
        stage: CopyEditingStage,
    ) -> Result<entity::manuscript::Model, DbErr> {
        entity::manuscript::ActiveModel {
            id: ActiveValue::Unchanged(id),
            copy_editing_stage: ActiveValue::Set(stage.as_str().to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    pub async fn assign_issue(
        &self,
        id: i32,
        volume: i32,
        issue: i32,
    ) -> Result<entity::manuscript::Model, DbErr> {
        entity::manuscript::ActiveModel {
            id: ActiveValue::Unchanged(id),
            volume: ActiveValue::Set(Some(volume)),
            issue: ActiveValue::Set(Some(issue)),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Stores a DOI on a manuscript that does not have one yet.
    ///
    /// # Returns
    /// - `Ok(true)` - DOI stored
    /// - `Ok(false)` - Manuscript does not exist or already has a DOI
    /// - `Err(DbErr)` - Database error; a DOI already held by another manuscript
    ///   fails the unique index
    pub async fn set_doi(&self, id: i32, doi: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Manuscript::update_many()
            .col_expr(entity::manuscript::Column::Doi, Expr::value(doi))
            .col_expr(entity::manuscript::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::manuscript::Column::Id.eq(id))
            .filter(entity::manuscript::Column::Doi.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks a manuscript published on the given date.
    pub async fn mark_published(
        &self,
        id: i32,
        published_date: DateTime<Utc>,
    ) -> Result<entity::manuscript::Model, DbErr> {
        entity::manuscript::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(ManuscriptStatus::Published.as_str().to_string()),
            published_date: ActiveValue::Set(Some(published_date)),
            updated_at: ActiveValue::Set(published_date),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Increments a view or download counter in place.
    ///
    /// # Returns
    /// - `Ok(true)` - Counter incremented
    /// - `Ok(false)` - No manuscript with that ID
    /// - `Err(DbErr)` - Database error
    pub async fn increment_metric(&self, id: i32, metric: MetricKind) -> Result<bool, DbErr> {
        let (column, expr) = match metric {
            MetricKind::Views => (entity::manuscript::Column::Views, "\"views\" + 1"),
            MetricKind::Downloads => (entity::manuscript::Column::Downloads, "\"downloads\" + 1"),
        };

        let result = entity::prelude::Manuscript::update_many()
            .col_expr(column, Expr::cust(expr))
            .filter(entity::manuscript::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts manuscripts whose DOI starts with the given stem.
    pub async fn count_with_doi_prefix(&self, stem: &str) -> Result<u64, DbErr> {
        entity::prelude::Manuscript::find()
            .filter(entity::manuscript::Column::Doi.starts_with(stem))
            .count(self.db)
            .await
    }

    /// Checks whether a DOI is held by any manuscript other than `exclude_id`.
    pub async fn doi_exists(&self, doi: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Manuscript::find().filter(entity::manuscript::Column::Doi.eq(doi));

        if let Some(id) = exclude_id {
            query = query.filter(entity::manuscript::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }
}
