//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique identifiers in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a volume, one of its issues and a manuscript assigned to it.
///
/// The manuscript is submitted by a fresh author and sits in `copy_editing`
/// with the given copy-editing stage.
///
/// # Returns
/// - `Ok((author, volume, issue, manuscript))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_issue_with_manuscript(
    db: &DatabaseConnection,
    volume_number: i32,
    issue_number: i32,
    copy_editing_stage: &str,
) -> Result<
    (
        entity::user::Model,
        entity::volume::Model,
        entity::issue::Model,
        entity::manuscript::Model,
    ),
    DbErr,
> {
    let author = crate::factory::user::create_user(db).await?;
    let volume = crate::factory::volume::VolumeFactory::new(db)
        .number(volume_number)
        .build()
        .await?;
    let issue = crate::factory::volume::IssueFactory::new(db, volume.id)
        .number(issue_number)
        .build()
        .await?;
    let manuscript = crate::factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("copy_editing")
        .copy_editing_stage(copy_editing_stage)
        .volume_issue(volume_number, issue_number)
        .build()
        .await?;

    Ok((author, volume, issue, manuscript))
}
