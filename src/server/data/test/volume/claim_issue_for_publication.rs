use super::*;
use chrono::Utc;
use sea_orm::EntityTrait;

/// Tests claiming a draft issue for publication.
///
/// Expected: Ok(true) with status `published` and a publication date
#[tokio::test]
async fn claims_draft_issue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let volume = factory::create_volume(db, 1).await?;
    let issue = factory::create_issue(db, volume.id, 1).await?;

    let claimed = VolumeRepository::new(db)
        .claim_issue_for_publication(issue.id, Utc::now())
        .await?;

    assert!(claimed);
    let issue = entity::prelude::Issue::find_by_id(issue.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(issue.status, "published");
    assert!(issue.published_date.is_some());

    Ok(())
}

/// Tests that only one of two claims on the same issue succeeds.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn claims_issue_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let volume = factory::create_volume(db, 1).await?;
    let issue = factory::create_issue(db, volume.id, 1).await?;
    let repo = VolumeRepository::new(db);

    assert!(repo.claim_issue_for_publication(issue.id, Utc::now()).await?);
    assert!(!repo.claim_issue_for_publication(issue.id, Utc::now()).await?);

    Ok(())
}

/// Tests returning a claimed issue to draft.
///
/// Expected: status `draft` without a publication date, claimable again
#[tokio::test]
async fn releases_claimed_issue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let volume = factory::create_volume(db, 1).await?;
    let issue = factory::create_issue(db, volume.id, 1).await?;
    let repo = VolumeRepository::new(db);

    repo.claim_issue_for_publication(issue.id, Utc::now()).await?;
    let released = repo.release_issue(issue.id).await?;

    assert_eq!(released.status, "draft");
    assert!(released.published_date.is_none());
    assert!(repo.claim_issue_for_publication(issue.id, Utc::now()).await?);

    Ok(())
}
