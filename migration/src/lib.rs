pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_user_role_table;
mod m20260105_000003_create_manuscript_table;
mod m20260105_000004_create_review_table;
mod m20260105_000005_create_payment_table;
mod m20260105_000006_create_fee_config_table;
mod m20260105_000007_create_volume_table;
mod m20260105_000008_create_issue_table;
mod m20260105_000009_create_notification_table;
mod m20260105_000010_create_correction_table;
mod m20260105_000011_create_doi_sequence_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_user_role_table::Migration),
            Box::new(m20260105_000003_create_manuscript_table::Migration),
            Box::new(m20260105_000004_create_review_table::Migration),
            Box::new(m20260105_000005_create_payment_table::Migration),
            Box::new(m20260105_000006_create_fee_config_table::Migration),
            Box::new(m20260105_000007_create_volume_table::Migration),
            Box::new(m20260105_000008_create_issue_table::Migration),
            Box::new(m20260105_000009_create_notification_table::Migration),
            Box::new(m20260105_000010_create_correction_table::Migration),
            Box::new(m20260105_000011_create_doi_sequence_table::Migration),
        ]
    }
}
