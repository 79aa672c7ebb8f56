use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Volume::Table)
                    .if_not_exists()
                    .col(pk_auto(Volume::Id))
                    .col(integer_uniq(Volume::Number))
                    .col(integer(Volume::Year))
                    .col(string_null(Volume::Title))
                    .col(
                        timestamp_with_time_zone(Volume::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Volume::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Volume {
    Table,
    Id,
    Number,
    Year,
    Title,
    CreatedAt,
}
