use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000003_create_manuscript_table::Manuscript,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(pk_auto(Review::Id))
                    .col(integer(Review::ManuscriptId))
                    .col(integer(Review::ReviewerId))
                    .col(string(Review::Status))
                    .col(string_null(Review::Recommendation))
                    .col(text_null(Review::Comments))
                    .col(timestamp_with_time_zone_null(Review::DueDate))
                    .col(
                        timestamp_with_time_zone(Review::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Review::SubmittedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_manuscript_id")
                            .from(Review::Table, Review::ManuscriptId)
                            .to(Manuscript::Table, Manuscript::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_reviewer_id")
                            .from(Review::Table, Review::ReviewerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Review {
    Table,
    Id,
    ManuscriptId,
    ReviewerId,
    Status,
    Recommendation,
    Comments,
    DueDate,
    CreatedAt,
    SubmittedAt,
}
