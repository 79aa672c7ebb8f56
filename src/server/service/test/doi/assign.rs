use super::*;

/// Tests storing a generated DOI on a manuscript.
///
/// Expected: the manuscript holds the returned DOI
#[tokio::test]
async fn assigns_manuscript_doi() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;

    let doi = DoiService::new(db, &format)
        .assign_manuscript_doi(manuscript.id, 2025, 3, 2)
        .await?;

    assert_eq!(doi, "10.1578/gjadt20250302001");
    let stored = entity::prelude::Manuscript::find_by_id(manuscript.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.doi.as_deref(), Some(doi.as_str()));

    Ok(())
}

/// Tests publishing a correction under a generated DOI.
///
/// Expected: correction is published with a DOI of the publication year
#[tokio::test]
async fn assigns_correction_doi() -> Result<(), AppError> {
    let test = TestBuilder::new().with_publication_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let format = DoiFormat::default();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let correction = factory::create_correction(db, manuscript.id, author.id).await?;
    let published_date = chrono::DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    let doi = DoiService::new(db, &format)
        .assign_correction_doi(correction.id, published_date)
        .await?;

    assert_eq!(doi, "10.1578/gjadt202600001");
    let stored = entity::prelude::Correction::find_by_id(correction.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.status, "published");
    assert_eq!(stored.doi.as_deref(), Some(doi.as_str()));
    assert_eq!(stored.published_date, Some(published_date));

    Ok(())
}
