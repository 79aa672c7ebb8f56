use super::*;

fn params(submitter_id: i32) -> CreateManuscriptParams {
    CreateManuscriptParams {
        submitter_id,
        title: "Orbital Resonance in Trojan Asteroids".to_string(),
        abstract_text: "We study resonance.".to_string(),
        article_type: "research".to_string(),
        authors: vec![Author {
            name: "Ada".to_string(),
            email: Some("ada@example.org".to_string()),
            affiliation: "Kathmandu University".to_string(),
            country: "NP".to_string(),
            corresponding: true,
        }],
        country: "NP".to_string(),
        institution: "Kathmandu University".to_string(),
        file_url: None,
    }
}

/// Tests creating a submission.
///
/// Verifies the initial workflow state, empty publication fields, zeroed metrics
/// and the serialized author list.
///
/// Expected: Ok with status `submitted` and stage `not_started`
#[tokio::test]
async fn creates_submitted_manuscript() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = ManuscriptRepository::new(db)
        .create(&params(author.id))
        .await?;

    assert_eq!(manuscript.submitter_id, author.id);
    assert_eq!(manuscript.status, "submitted");
    assert_eq!(manuscript.copy_editing_stage, "not_started");
    assert!(manuscript.doi.is_none());
    assert!(manuscript.volume.is_none());
    assert_eq!(manuscript.views, 0);
    assert_eq!(manuscript.authors[0]["country"], "NP");

    Ok(())
}

/// Tests that a created manuscript can be read back.
///
/// Expected: Ok(Some) with the same title
#[tokio::test]
async fn finds_created_manuscript() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let repo = ManuscriptRepository::new(db);
    let created = repo.create(&params(author.id)).await?;

    let found = repo.find_by_id(created.id).await?.unwrap();

    assert_eq!(found.title, "Orbital Resonance in Trojan Asteroids");
    assert!(repo.find_by_id(created.id + 1).await?.is_none());

    Ok(())
}
