use super::*;

/// Tests the assigned reviewer submitting a recommendation.
///
/// Expected: review submitted with the recommendation
#[tokio::test]
async fn reviewer_submits_recommendation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let reviewer = factory::user::create_user_with_roles(db, &["reviewer"]).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let service = ReviewService::new(db);
    let review = service.assign(assignment(manuscript.id, reviewer.id)).await?;

    let updated = service
        .respond(
            review.id,
            reviewer.id,
            ReviewResponseParams {
                status: ReviewStatus::Submitted,
                recommendation: Some(Recommendation::MinorRevision),
                comments: Some("Clarify the methods section.".to_string()),
            },
        )
        .await?;

    assert_eq!(updated.status, ReviewStatus::Submitted);
    assert_eq!(updated.recommendation, Some(Recommendation::MinorRevision));
    assert!(updated.submitted_at.is_some());

    Ok(())
}

/// Tests another user answering the review, and answering twice.
///
/// Expected: Err(AuthError::AccessDenied), then Err(AppError::Conflict)
#[tokio::test]
async fn only_assigned_reviewer_answers_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let reviewer = factory::user::create_user_with_roles(db, &["reviewer"]).await?;
    let other = factory::user::create_user_with_roles(db, &["reviewer"]).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let service = ReviewService::new(db);
    let review = service.assign(assignment(manuscript.id, reviewer.id)).await?;
    let decline = || ReviewResponseParams {
        status: ReviewStatus::Declined,
        recommendation: None,
        comments: None,
    };

    assert!(matches!(
        service.respond(review.id, other.id, decline()).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    service.respond(review.id, reviewer.id, decline()).await?;

    assert!(matches!(
        service.respond(review.id, reviewer.id, decline()).await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}
