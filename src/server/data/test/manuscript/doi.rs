use super::*;

/// Tests storing a DOI and detecting it as taken.
///
/// Expected: the DOI exists, except when the holder itself is excluded
#[tokio::test]
async fn detects_existing_doi() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let repo = ManuscriptRepository::new(db);

    repo.set_doi(manuscript.id, "10.1578/gjadt20250101001").await?;

    assert!(repo.doi_exists("10.1578/gjadt20250101001", None).await?);
    assert!(
        !repo
            .doi_exists("10.1578/gjadt20250101001", Some(manuscript.id))
            .await?
    );
    assert!(!repo.doi_exists("10.1578/gjadt20250101002", None).await?);

    Ok(())
}

/// Tests that two manuscripts cannot hold the same DOI.
///
/// Expected: Err from the unique index
#[tokio::test]
async fn rejects_duplicate_doi() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let first = factory::create_manuscript(db, author.id).await?;
    let second = factory::create_manuscript(db, author.id).await?;
    let repo = ManuscriptRepository::new(db);

    repo.set_doi(first.id, "10.1578/gjadt20250101001").await?;
    let result = repo.set_doi(second.id, "10.1578/gjadt20250101001").await;

    assert!(result.is_err());

    Ok(())
}

/// Tests that a stored DOI is never overwritten.
///
/// Expected: Ok(true) for the first DOI, Ok(false) for the second, first DOI kept
#[tokio::test]
async fn keeps_existing_doi() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let repo = ManuscriptRepository::new(db);

    assert!(repo.set_doi(manuscript.id, "10.1578/gjadt20250101001").await?);
    assert!(!repo.set_doi(manuscript.id, "10.1578/gjadt20250101002").await?);

    let stored = repo.find_by_id(manuscript.id).await?.unwrap();
    assert_eq!(stored.doi.as_deref(), Some("10.1578/gjadt20250101001"));

    Ok(())
}

/// Tests counting DOIs under a stem.
///
/// Expected: only DOIs of the same year, volume and issue are counted
#[tokio::test]
async fn counts_dois_with_stem() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    for doi in [
        "10.1578/gjadt20250101001",
        "10.1578/gjadt20250101002",
        "10.1578/gjadt20250102001",
    ] {
        factory::manuscript::ManuscriptFactory::new(db, author.id)
            .doi(doi)
            .build()
            .await?;
    }
    factory::create_manuscript(db, author.id).await?;

    let count = ManuscriptRepository::new(db)
        .count_with_doi_prefix("10.1578/gjadt20250101")
        .await?;

    assert_eq!(count, 2);

    Ok(())
}
