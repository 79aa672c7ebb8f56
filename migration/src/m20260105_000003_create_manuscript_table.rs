use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manuscript::Table)
                    .if_not_exists()
                    .col(pk_auto(Manuscript::Id))
                    .col(integer(Manuscript::SubmitterId))
                    .col(string(Manuscript::Title))
                    .col(text(Manuscript::AbstractText))
                    .col(string(Manuscript::ArticleType))
                    .col(json(Manuscript::Authors))
                    .col(string(Manuscript::Country))
                    .col(string(Manuscript::Institution))
                    .col(string_null(Manuscript::FileUrl))
                    .col(string(Manuscript::Status))
                    .col(string(Manuscript::CopyEditingStage))
                    .col(integer_null(Manuscript::Volume))
                    .col(integer_null(Manuscript::Issue))
                    .col(string_null(Manuscript::Doi).unique_key())
                    .col(timestamp_with_time_zone_null(Manuscript::PublishedDate))
                    .col(big_integer(Manuscript::Views).default(0))
                    .col(big_integer(Manuscript::Downloads).default(0))
                    .col(big_integer(Manuscript::Citations).default(0))
                    .col(
                        timestamp_with_time_zone(Manuscript::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Manuscript::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_manuscript_submitter_id")
                            .from(Manuscript::Table, Manuscript::SubmitterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_manuscript_volume_issue")
                    .table(Manuscript::Table)
                    .col(Manuscript::Volume)
                    .col(Manuscript::Issue)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Manuscript::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Manuscript {
    Table,
    Id,
    SubmitterId,
    Title,
    AbstractText,
    ArticleType,
    Authors,
    Country,
    Institution,
    FileUrl,
    Status,
    CopyEditingStage,
    Volume,
    Issue,
    Doi,
    PublishedDate,
    Views,
    Downloads,
    Citations,
    CreatedAt,
    UpdatedAt,
}
