use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::review::ReviewStatus,
    server::model::review::{AssignReviewerParams, ReviewResponseParams},
};

pub struct ReviewRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an assigned review for a reviewer.
    pub async fn create(
        &self,
        params: &AssignReviewerParams,
    ) -> Result<entity::review::Model, DbErr> {
        entity::review::ActiveModel {
            manuscript_id: ActiveValue::Set(params.manuscript_id),
            reviewer_id: ActiveValue::Set(params.reviewer_id),
            status: ActiveValue::Set(ReviewStatus::Assigned.as_str().to_string()),
            recommendation: ActiveValue::Set(None),
            comments: ActiveValue::Set(None),
            due_date: ActiveValue::Set(params.due_date),
            created_at: ActiveValue::Set(Utc::now()),
            submitted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::review::Model>, DbErr> {
        entity::prelude::Review::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_manuscript(
        &self,
        manuscript_id: i32,
    ) -> Result<Vec<entity::review::Model>, DbErr> {
        entity::prelude::Review::find()
            .filter(entity::review::Column::ManuscriptId.eq(manuscript_id))
            .order_by_asc(entity::review::Column::CreatedAt)
            .order_by_asc(entity::review::Column::Id)
            .all(self.db)
            .await
    }

    /// Whether the reviewer has been assigned to the manuscript, whatever the
    /// review's current status.
    pub async fn is_assigned(&self, manuscript_id: i32, reviewer_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Review::find()
            .filter(entity::review::Column::ManuscriptId.eq(manuscript_id))
            .filter(entity::review::Column::ReviewerId.eq(reviewer_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Records a reviewer's submission or decline.
    pub async fn respond(
        &self,
        id: i32,
        params: &ReviewResponseParams,
    ) -> Result<entity::review::Model, DbErr> {
        entity::review::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            recommendation: ActiveValue::Set(
                params.recommendation.map(|r| r.as_str().to_string()),
            ),
            comments: ActiveValue::Set(params.comments.clone()),
            submitted_at: ActiveValue::Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(self.db)
        .await
    }
}
