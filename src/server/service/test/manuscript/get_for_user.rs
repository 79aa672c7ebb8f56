use super::*;

/// Tests visibility of a manuscript to its submitter, staff and strangers.
///
/// Expected: submitter and copy editor see it, another author is denied
#[tokio::test]
async fn restricts_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let copy_editor = factory::user::create_user_with_roles(db, &["copy_editor"]).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let service = ManuscriptService::new(db);

    let author = load_user(db, author.id).await?;
    let other = load_user(db, other.id).await?;
    let copy_editor = load_user(db, copy_editor.id).await?;

    assert!(service.get_for_user(manuscript.id, &author).await.is_ok());
    assert!(service.get_for_user(manuscript.id, &copy_editor).await.is_ok());
    assert!(matches!(
        service.get_for_user(manuscript.id, &other).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that an assigned reviewer can read the manuscript.
///
/// Expected: Ok(Manuscript)
#[tokio::test]
async fn assigned_reviewer_has_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let reviewer = factory::user::create_user_with_roles(db, &["reviewer"]).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    crate::server::service::review::ReviewService::new(db)
        .assign(crate::server::model::review::AssignReviewerParams {
            manuscript_id: manuscript.id,
            reviewer_id: reviewer.id,
            due_date: None,
        })
        .await?;
    let reviewer = load_user(db, reviewer.id).await?;

    let result = ManuscriptService::new(db)
        .get_for_user(manuscript.id, &reviewer)
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests that authors only list their own submissions while editors list all.
///
/// Expected: author sees 1, editor sees 2
#[tokio::test]
async fn lists_by_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let editor = factory::user::create_user_with_roles(db, &["editor"]).await?;
    factory::create_manuscript(db, author.id).await?;
    factory::create_manuscript(db, other.id).await?;
    let service = ManuscriptService::new(db);

    let author = load_user(db, author.id).await?;
    let editor = load_user(db, editor.id).await?;

    let own = service.list_for_user(&author, None, 0, 10).await?;
    let all = service.list_for_user(&editor, None, 0, 10).await?;

    assert_eq!(own.total, 1);
    assert_eq!(own.manuscripts[0].submitter_id, author.id);
    assert_eq!(all.total, 2);
    assert_eq!(all.total_pages, 1);

    Ok(())
}
