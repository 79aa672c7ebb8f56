use sea_orm_migration::{prelude::*, schema::*};

/// Per-scope DOI sequence counters, reserved with a single atomic upsert.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DoiSequence::Table)
                    .if_not_exists()
                    .col(string(DoiSequence::Scope).primary_key())
                    .col(integer(DoiSequence::Value))
                    .col(
                        timestamp_with_time_zone(DoiSequence::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DoiSequence::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DoiSequence {
    Table,
    Scope,
    Value,
    UpdatedAt,
}
