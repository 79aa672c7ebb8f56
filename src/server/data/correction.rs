use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

use crate::{
    model::correction::CorrectionStatus, server::model::correction::CreateCorrectionParams,
};

pub struct CorrectionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CorrectionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft correction without a DOI.
    pub async fn create(
        &self,
        params: &CreateCorrectionParams,
    ) -> Result<entity::correction::Model, DbErr> {
        entity::correction::ActiveModel {
            manuscript_id: ActiveValue::Set(params.manuscript_id),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            description: ActiveValue::Set(params.description.clone()),
            doi: ActiveValue::Set(None),
            status: ActiveValue::Set(CorrectionStatus::Draft.as_str().to_string()),
            published_date: ActiveValue::Set(None),
            created_by: ActiveValue::Set(params.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::correction::Model>, DbErr> {
        entity::prelude::Correction::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_manuscript(
        &self,
        manuscript_id: i32,
    ) -> Result<Vec<entity::correction::Model>, DbErr> {
        entity::prelude::Correction::find()
            .filter(entity::correction::Column::ManuscriptId.eq(manuscript_id))
            .order_by_asc(entity::correction::Column::CreatedAt)
            .order_by_asc(entity::correction::Column::Id)
            .all(self.db)
            .await
    }

    /// Publishes a draft correction under the given DOI.
    ///
    /// # Returns
    /// - `Ok(true)` - Correction published
    /// - `Ok(false)` - Correction does not exist or is no longer a draft
    /// - `Err(DbErr)` - Database error; a DOI already held by another correction
    ///   fails the unique index
    pub async fn publish(
        &self,
        id: i32,
        doi: &str,
        published_date: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Correction::update_many()
            .col_expr(entity::correction::Column::Doi, Expr::value(doi))
            .col_expr(
                entity::correction::Column::Status,
                Expr::value(CorrectionStatus::Published.as_str()),
            )
            .col_expr(
                entity::correction::Column::PublishedDate,
                Expr::value(published_date),
            )
            .filter(entity::correction::Column::Id.eq(id))
            .filter(entity::correction::Column::Status.eq(CorrectionStatus::Draft.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts corrections whose DOI starts with the given stem.
    pub async fn count_with_doi_prefix(&self, stem: &str) -> Result<u64, DbErr> {
        entity::prelude::Correction::find()
            .filter(entity::correction::Column::Doi.starts_with(stem))
            .count(self.db)
            .await
    }

    /// Checks whether a DOI is held by any correction other than `exclude_id`.
    pub async fn doi_exists(&self, doi: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Correction::find().filter(entity::correction::Column::Doi.eq(doi));

        if let Some(id) = exclude_id {
            query = query.filter(entity::correction::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }
}
