use super::*;

fn filter(submitter_id: Option<i32>, status: Option<ManuscriptStatus>) -> ManuscriptFilter {
    ManuscriptFilter {
        submitter_id,
        status,
        page: 0,
        per_page: 10,
    }
}

/// Tests restricting listings to one submitter.
///
/// Expected: Ok with only the submitter's manuscripts
#[tokio::test]
async fn filters_by_submitter() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    factory::create_manuscript(db, first.id).await?;
    factory::create_manuscript(db, first.id).await?;
    factory::create_manuscript(db, second.id).await?;

    let (manuscripts, total) = ManuscriptRepository::new(db)
        .get_paginated(&filter(Some(first.id), None))
        .await?;

    assert_eq!(total, 2);
    assert!(manuscripts.iter().all(|m| m.submitter_id == first.id));

    Ok(())
}

/// Tests filtering by workflow status.
///
/// Expected: Ok with only accepted manuscripts
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    factory::create_manuscript(db, author.id).await?;
    factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("accepted")
        .build()
        .await?;

    let (manuscripts, total) = ManuscriptRepository::new(db)
        .get_paginated(&filter(None, Some(ManuscriptStatus::Accepted)))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(manuscripts[0].status, "accepted");

    Ok(())
}

/// Tests paging beyond the last page.
///
/// Expected: Ok with an empty page but the full total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    factory::create_manuscript(db, author.id).await?;

    let (manuscripts, total) = ManuscriptRepository::new(db)
        .get_paginated(&ManuscriptFilter {
            submitter_id: None,
            status: None,
            page: 3,
            per_page: 10,
        })
        .await?;

    assert!(manuscripts.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
