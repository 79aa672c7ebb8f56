use super::*;

/// Tests a copy editor handing the edit to the author.
///
/// Expected: stage author_review and the submitter notified
#[tokio::test]
async fn copy_editor_requests_author_review() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let copy_editor = factory::user::create_user_with_roles(db, &["copy_editor"]).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("copy_editing")
        .copy_editing_stage("editing")
        .build()
        .await?;
    let copy_editor = load_user(db, copy_editor.id).await?;

    let updated = ManuscriptService::new(db)
        .update_copy_editing_stage(manuscript.id, CopyEditingStage::AuthorReview, &copy_editor)
        .await?;

    assert_eq!(updated.copy_editing_stage, CopyEditingStage::AuthorReview);
    let notifications = entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(author.id))
        .all(db)
        .await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "author_review_requested");

    Ok(())
}

/// Tests that only the submitter approves the copy-edit.
///
/// Expected: Err(AuthError::AccessDenied) for the copy editor, Ok for the author
#[tokio::test]
async fn only_submitter_approves() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let copy_editor = factory::user::create_user_with_roles(db, &["copy_editor"]).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("copy_editing")
        .copy_editing_stage("author_review")
        .build()
        .await?;
    let author = load_user(db, author.id).await?;
    let copy_editor = load_user(db, copy_editor.id).await?;
    let service = ManuscriptService::new(db);

    let denied = service
        .update_copy_editing_stage(manuscript.id, CopyEditingStage::AuthorApproved, &copy_editor)
        .await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let approved = service
        .update_copy_editing_stage(manuscript.id, CopyEditingStage::AuthorApproved, &author)
        .await?;
    assert_eq!(approved.copy_editing_stage, CopyEditingStage::AuthorApproved);

    Ok(())
}

/// Tests that the author cannot drive editing moves.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn author_cannot_start_editing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("copy_editing")
        .build()
        .await?;
    let author = load_user(db, author.id).await?;

    let result = ManuscriptService::new(db)
        .update_copy_editing_stage(manuscript.id, CopyEditingStage::Editing, &author)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests stage moves outside copy-editing and production.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn requires_copy_editing_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let editor = factory::user::create_user_with_roles(db, &["editor"]).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("accepted")
        .build()
        .await?;
    let editor = load_user(db, editor.id).await?;

    let result = ManuscriptService::new(db)
        .update_copy_editing_stage(manuscript.id, CopyEditingStage::Editing, &editor)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests moves that are not part of the stage workflow.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_skipping_stages() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manuscript_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let editor = factory::user::create_user_with_roles(db, &["editor"]).await?;
    let manuscript = factory::manuscript::ManuscriptFactory::new(db, author.id)
        .status("copy_editing")
        .build()
        .await?;
    let editor = load_user(db, editor.id).await?;

    let result = ManuscriptService::new(db)
        .update_copy_editing_stage(manuscript.id, CopyEditingStage::AuthorApproved, &editor)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
