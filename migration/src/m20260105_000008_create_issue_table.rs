use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000007_create_volume_table::Volume;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issue::Table)
                    .if_not_exists()
                    .col(pk_auto(Issue::Id))
                    .col(integer(Issue::VolumeId))
                    .col(integer(Issue::Number))
                    .col(string_null(Issue::Title))
                    .col(string(Issue::Status).default("draft"))
                    .col(timestamp_with_time_zone_null(Issue::PublishedDate))
                    .col(
                        timestamp_with_time_zone(Issue::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_volume_id")
                            .from(Issue::Table, Issue::VolumeId)
                            .to(Volume::Table, Volume::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issue_volume_number")
                    .table(Issue::Table)
                    .col(Issue::VolumeId)
                    .col(Issue::Number)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Issue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Issue {
    Table,
    Id,
    VolumeId,
    Number,
    Title,
    Status,
    PublishedDate,
    CreatedAt,
}
