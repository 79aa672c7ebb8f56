use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000003_create_manuscript_table::Manuscript;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Correction::Table)
                    .if_not_exists()
                    .col(pk_auto(Correction::Id))
                    .col(integer(Correction::ManuscriptId))
                    .col(string(Correction::Kind))
                    .col(text(Correction::Description))
                    .col(string_null(Correction::Doi).unique_key())
                    .col(string(Correction::Status).default("draft"))
                    .col(timestamp_with_time_zone_null(Correction::PublishedDate))
                    .col(integer(Correction::CreatedBy))
                    .col(
                        timestamp_with_time_zone(Correction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_correction_manuscript_id")
                            .from(Correction::Table, Correction::ManuscriptId)
                            .to(Manuscript::Table, Manuscript::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Correction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Correction {
    Table,
    Id,
    ManuscriptId,
    Kind,
    Description,
    Doi,
    Status,
    PublishedDate,
    CreatedBy,
    CreatedAt,
}
