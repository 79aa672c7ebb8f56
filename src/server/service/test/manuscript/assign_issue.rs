use super::*;

/// Tests placing an accepted manuscript in a draft issue.
///
/// Expected: volume and issue stored on the manuscript
#[tokio::test]
async fn assigns_draft_issue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let volume = factory::create_volume(db, 4).await?;
    factory::create_issue(db, volume.id, 2).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("accepted")
        .build()
        .await?;

    let updated = ManuscriptService::new(db)
        .assign_issue(manuscript.id, 4, 2)
        .await?;

    assert_eq!(updated.volume, Some(4));
    assert_eq!(updated.issue, Some(2));

    Ok(())
}

/// Tests assigning a manuscript still under review.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn requires_accepted_manuscript() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let volume = factory::create_volume(db, 4).await?;
    factory::create_issue(db, volume.id, 2).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("under_review")
        .build()
        .await?;

    let result = ManuscriptService::new(db)
        .assign_issue(manuscript.id, 4, 2)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests assigning to a missing or already published issue.
///
/// Expected: Err(AppError::NotFound) and Err(AppError::Conflict)
#[tokio::test]
async fn rejects_missing_or_published_issue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let volume = factory::create_volume(db, 4).await?;
    factory::volume::IssueFactory::new(db, volume.id)
        .number(1)
        .status("published")
        .build()
        .await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("accepted")
        .build()
        .await?;
    let service = ManuscriptService::new(db);

    assert!(matches!(
        service.assign_issue(manuscript.id, 4, 9).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.assign_issue(manuscript.id, 4, 1).await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}

/// Tests moving a manuscript whose DOI belongs to another issue.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn keeps_doi_issue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let volume = factory::create_volume(db, 1).await?;
    factory::create_issue(db, volume.id, 1).await?;
    factory::create_issue(db, volume.id, 2).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("copy_editing")
        .volume_issue(1, 1)
        .doi("10.1578/gjadt20250101001")
        .build()
        .await?;

    let result = ManuscriptService::new(db)
        .assign_issue(manuscript.id, 1, 2)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
