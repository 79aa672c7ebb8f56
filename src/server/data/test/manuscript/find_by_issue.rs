use super::*;

/// Tests listing the manuscripts assigned to an issue.
///
/// Expected: Ok with only manuscripts of volume 1 issue 2
#[tokio::test]
async fn returns_manuscripts_of_issue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let wanted = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .volume_issue(1, 2)
        .build()
        .await?;
    factory::manuscript::ManuscriptFactory::new(db, author.id)
        .volume_issue(1, 1)
        .build()
        .await?;
    factory::manuscript::ManuscriptFactory::new(db, author.id)
        .volume_issue(2, 2)
        .build()
        .await?;
    factory::create_manuscript(db, author.id).await?;

    let manuscripts = ManuscriptRepository::new(db).find_by_issue(1, 2).await?;

    assert_eq!(manuscripts.len(), 1);
    assert_eq!(manuscripts[0].id, wanted.id);

    Ok(())
}
