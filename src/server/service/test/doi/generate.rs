use super::*;

/// Tests the first DOI of a clean issue scope.
///
/// Expected: sequence 001 that parses back to the same volume and issue
#[tokio::test]
async fn generates_first_doi_for_issue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();
    let service = DoiService::new(db, &format);

    let doi = service.generate_manuscript_doi(2025, 1, 1).await?;

    assert_eq!(doi, "10.1578/gjadt20250101001");
    assert_eq!(
        service.parse(&doi),
        Some(ParsedDoi::Manuscript {
            year: 2025,
            volume: 1,
            issue: 1,
            sequence: 1,
        })
    );

    Ok(())
}

/// Tests two concurrent reservations for the same issue.
///
/// Expected: distinct DOIs with sequences 1 and 2
#[tokio::test]
async fn concurrent_generation_yields_distinct_dois() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();
    let service = DoiService::new(db, &format);

    let (first, second) = tokio::join!(
        service.generate_manuscript_doi(2025, 1, 1),
        service.generate_manuscript_doi(2025, 1, 1)
    );
    let (first, second) = (first?, second?);

    assert_ne!(first, second);
    let mut dois = vec![first, second];
    dois.sort();
    assert_eq!(
        dois,
        vec![
            "10.1578/gjadt20250101001".to_string(),
            "10.1578/gjadt20250101002".to_string()
        ]
    );

    Ok(())
}

/// Tests that a new counter continues after DOIs already stored for the issue.
///
/// Expected: sequence 003 after two stored DOIs
#[tokio::test]
async fn continues_after_existing_dois() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();

    let author = factory::create_user(db).await?;
    for doi in ["10.1578/gjadt20250101001", "10.1578/gjadt20250101002"] {
        factory::manuscript::ManuscriptFactory::new(db, author.id)
            .doi(doi)
            .build()
            .await?;
    }

    let doi = DoiService::new(db, &format)
        .generate_manuscript_doi(2025, 1, 1)
        .await?;

    assert_eq!(doi, "10.1578/gjadt20250101003");

    Ok(())
}

/// Tests that a reserved number whose DOI was entered by hand is skipped.
///
/// Expected: the next free sequence
#[tokio::test]
async fn skips_dois_already_in_use() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();

    let author = factory::create_user(db).await?;
    factory::manuscript::ManuscriptFactory::new(db, author.id)
        .doi("10.1578/gjadt20250101002")
        .build()
        .await?;

    let doi = DoiService::new(db, &format)
        .generate_manuscript_doi(2025, 1, 1)
        .await?;

    assert_eq!(doi, "10.1578/gjadt20250101003");

    Ok(())
}

/// Tests that an issue runs out after sequence 999.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn fails_when_sequence_exhausted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();

    DoiSequenceRepository::new(db)
        .reserve("manuscript:2025-01-01", 999)
        .await?;

    let result = DoiService::new(db, &format)
        .generate_manuscript_doi(2025, 1, 1)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that components outside the fixed-width fields are rejected.
///
/// Expected: Err(AppError::BadRequest) for each
#[tokio::test]
async fn rejects_out_of_range_components() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();
    let service = DoiService::new(db, &format);

    assert!(matches!(
        service.generate_manuscript_doi(999, 1, 1).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.generate_manuscript_doi(2025, 0, 1).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.generate_manuscript_doi(2025, 1, 100).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.generate_correction_doi(10000).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests correction DOIs.
///
/// Expected: `00` in place of volume and issue, parsed as a correction
#[tokio::test]
async fn generates_correction_doi() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();
    let service = DoiService::new(db, &format);

    let first = service.generate_correction_doi(2025).await?;
    let second = service.generate_correction_doi(2025).await?;

    assert_eq!(first, "10.1578/gjadt202500001");
    assert_eq!(second, "10.1578/gjadt202500002");
    assert_eq!(
        service.parse(&first),
        Some(ParsedDoi::Correction {
            year: 2025,
            sequence: 1,
        })
    );

    Ok(())
}
