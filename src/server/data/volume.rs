//! Volume and issue data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};

use crate::{
    model::volume::IssueStatus,
    server::model::volume::{CreateIssueParams, CreateVolumeParams},
};

pub struct VolumeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VolumeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a volume.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created volume
    /// - `Err(DbErr)` - Database error; a duplicate volume number fails the unique index
    pub async fn create_volume(
        &self,
        params: &CreateVolumeParams,
    ) -> Result<entity::volume::Model, DbErr> {
        entity::volume::ActiveModel {
            number: ActiveValue::Set(params.number),
            year: ActiveValue::Set(params.year),
            title: ActiveValue::Set(params.title.clone()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_volume(&self, id: i32) -> Result<Option<entity::volume::Model>, DbErr> {
        entity::prelude::Volume::find_by_id(id).one(self.db).await
    }

    pub async fn find_volume_by_number(
        &self,
        number: i32,
    ) -> Result<Option<entity::volume::Model>, DbErr> {
        entity::prelude::Volume::find()
            .filter(entity::volume::Column::Number.eq(number))
            .one(self.db)
            .await
    }

    /// Gets all volumes ordered by number, each with its issues ordered by number.
    pub async fn get_all_with_issues(
        &self,
    ) -> Result<Vec<(entity::volume::Model, Vec<entity::issue::Model>)>, DbErr> {
        entity::prelude::Volume::find()
            .order_by_asc(entity::volume::Column::Number)
            .find_with_related(entity::prelude::Issue)
            .order_by_asc(entity::issue::Column::Number)
            .all(self.db)
            .await
    }

    /// Creates a draft issue within a volume.
    pub async fn create_issue(
        &self,
        params: &CreateIssueParams,
    ) -> Result<entity::issue::Model, DbErr> {
        entity::issue::ActiveModel {
            volume_id: ActiveValue::Set(params.volume_id),
            number: ActiveValue::Set(params.number),
            title: ActiveValue::Set(params.title.clone()),
            status: ActiveValue::Set(IssueStatus::Draft.as_str().to_string()),
            published_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_issue_in_volume(
        &self,
        volume_id: i32,
        number: i32,
    ) -> Result<Option<entity::issue::Model>, DbErr> {
        entity::prelude::Issue::find()
            .filter(entity::issue::Column::VolumeId.eq(volume_id))
            .filter(entity::issue::Column::Number.eq(number))
            .one(self.db)
            .await
    }

    pub async fn find_issue(&self, id: i32) -> Result<Option<entity::issue::Model>, DbErr> {
        entity::prelude::Issue::find_by_id(id).one(self.db).await
    }

    /// Finds an issue by volume number and issue number.
    pub async fn find_issue_by_numbers(
        &self,
        volume_number: i32,
        issue_number: i32,
    ) -> Result<Option<(entity::volume::Model, entity::issue::Model)>, DbErr> {
        let Some(volume) = self.find_volume_by_number(volume_number).await? else {
            return Ok(None);
        };

        let issue = self.find_issue_in_volume(volume.id, issue_number).await?;

        Ok(issue.map(|issue| (volume, issue)))
    }

    /// Moves a draft issue to `published`.
    ///
    /// # Returns
    /// - `Ok(true)` - Issue claimed for publication
    /// - `Ok(false)` - Issue does not exist or is no longer a draft
    /// - `Err(DbErr)` - Database error
    pub async fn claim_issue_for_publication(
        &self,
        id: i32,
        published_date: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Issue::update_many()
            .col_expr(
                entity::issue::Column::Status,
                Expr::value(IssueStatus::Published.as_str()),
            )
            .col_expr(
                entity::issue::Column::PublishedDate,
                Expr::value(published_date),
            )
            .filter(entity::issue::Column::Id.eq(id))
            .filter(entity::issue::Column::Status.eq(IssueStatus::Draft.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Returns a claimed issue to draft after a failed publication.
    pub async fn release_issue(&self, id: i32) -> Result<entity::issue::Model, DbErr> {
        entity::issue::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(IssueStatus::Draft.as_str().to_string()),
            published_date: ActiveValue::Set(None),
            ..Default::default()
        }
        .update(self.db)
        .await
    }
}
