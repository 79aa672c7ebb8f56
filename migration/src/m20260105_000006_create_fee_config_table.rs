use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeeConfig::Table)
                    .if_not_exists()
                    .col(integer(FeeConfig::Id).primary_key())
                    .col(json(FeeConfig::Document))
                    .col(integer_null(FeeConfig::UpdatedBy))
                    .col(
                        timestamp_with_time_zone(FeeConfig::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeeConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FeeConfig {
    Table,
    Id,
    Document,
    UpdatedBy,
    UpdatedAt,
}
