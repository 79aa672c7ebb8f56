use super::*;

/// Tests creating a correction for a published manuscript.
///
/// Expected: draft correction without DOI
#[tokio::test]
async fn creates_draft_for_published_manuscript() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_publication_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let editor = factory::user::create_user_with_roles(db, &["editor"]).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("published")
        .build()
        .await?;

    let correction = CorrectionService::new(db)
        .create(erratum(manuscript.id, editor.id))
        .await?;

    assert_eq!(correction.status, CorrectionStatus::Draft);
    assert_eq!(correction.kind, CorrectionKind::Erratum);
    assert!(correction.doi.is_none());

    let listed = CorrectionService::new(db)
        .get_for_manuscript(manuscript.id)
        .await?;
    assert_eq!(listed.len(), 1);

    Ok(())
}

/// Tests creating a correction before publication.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn requires_published_manuscript() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_publication_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;

    let result = CorrectionService::new(db)
        .create(erratum(manuscript.id, author.id))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests creating a correction for a missing manuscript.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn requires_existing_manuscript() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_publication_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let editor = factory::user::create_user_with_roles(db, &["editor"]).await?;

    let result = CorrectionService::new(db).create(erratum(99, editor.id)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
