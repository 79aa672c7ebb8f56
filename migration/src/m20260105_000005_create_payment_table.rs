use sea_orm_migration::{prelude::*, schema::*, sea_orm::ConnectionTrait};

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
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::ManuscriptId))
                    .col(integer(Payment::UserId))
                    .col(big_integer(Payment::BaseFee))
                    .col(big_integer(Payment::Amount))
                    .col(big_integer(Payment::DiscountAmount))
                    .col(string_null(Payment::DiscountReason))
                    .col(boolean(Payment::IsWaiver).default(false))
                    .col(string(Payment::Currency))
                    .col(string(Payment::Status))
                    .col(string_null(Payment::StripeSessionId))
                    .col(string_null(Payment::StripePaymentIntent))
                    .col(string_null(Payment::CheckoutUrl))
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Payment::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_manuscript_id")
                            .from(Payment::Table, Payment::ManuscriptId)
                            .to(Manuscript::Table, Manuscript::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_user_id")
                            .from(Payment::Table, Payment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One open payment per manuscript; failed, expired and refunded rows may repeat
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_payment_open_manuscript \
                 ON payment (manuscript_id) \
                 WHERE status IN ('pending', 'completed', 'waived')",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    ManuscriptId,
    UserId,
    BaseFee,
    Amount,
    DiscountAmount,
    DiscountReason,
    IsWaiver,
    Currency,
    Status,
    StripeSessionId,
    StripePaymentIntent,
    CheckoutUrl,
    CreatedAt,
    UpdatedAt,
}
