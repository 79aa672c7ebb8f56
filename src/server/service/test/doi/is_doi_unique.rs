use super::*;

/// Tests uniqueness against manuscript DOIs.
///
/// Expected: taken unless the holder is excluded
#[tokio::test]
async fn checks_manuscript_dois() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();
    let service = DoiService::new(db, &format);

    let author = factory::create_user(db).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .doi("10.1578/gjadt20250101001")
        .build()
        .await?;

    assert!(!service.is_doi_unique("10.1578/gjadt20250101001", None).await?);
    assert!(
        service
            .is_doi_unique(
                "10.1578/gjadt20250101001",
                Some(DoiOwner::Manuscript(manuscript.id))
            )
            .await?
    );
    assert!(service.is_doi_unique("10.1578/gjadt20250101002", None).await?);

    Ok(())
}

/// Tests that differently-cased spellings of a journal DOI collide.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_case_of_journal_dois() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();

    let author = factory::create_user(db).await?;
    factory::manuscript::ManuscriptFactory::new(db, author.id)
        .doi("10.1578/gjadt20250101001")
        .build()
        .await?;

    let unique = DoiService::new(db, &format)
        .is_doi_unique(" 10.1578/GJADT20250101001 ", None)
        .await?;

    assert!(!unique);

    Ok(())
}

/// Tests uniqueness against correction DOIs.
///
/// Expected: taken, unless the correction itself is excluded
#[tokio::test]
async fn checks_correction_dois() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();
    let service = DoiService::new(db, &format);

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let correction = factory::correction::CorrectionFactory::new(db, manuscript.id, author.id)
        .published("10.1578/gjadt202500001", chrono::Utc::now())
        .build()
        .await?;

    assert!(!service.is_doi_unique("10.1578/gjadt202500001", None).await?);
    assert!(
        !service
            .is_doi_unique(
                "10.1578/gjadt202500001",
                Some(DoiOwner::Manuscript(manuscript.id))
            )
            .await?
    );
    assert!(
        service
            .is_doi_unique(
                "10.1578/gjadt202500001",
                Some(DoiOwner::Correction(correction.id))
            )
            .await?
    );

    Ok(())
}
