//! Peer review assignment and responses.

use sea_orm::DatabaseConnection;

use crate::{
    model::{manuscript::ManuscriptStatus, review::ReviewStatus, user::Role},
    server::{
        data::{review::ReviewRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::{
            notification::NotificationKind,
            review::{AssignReviewerParams, Review, ReviewResponseParams},
            user::User,
        },
        service::{manuscript::ManuscriptService, notification::NotificationService},
    },
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns a reviewer to a manuscript and notifies them.
    ///
    /// A freshly submitted manuscript moves to `under_review` with its first
    /// assignment.
    ///
    /// # Returns
    /// - `Ok(Review)` - The created review
    /// - `Err(AppError::NotFound)` - Manuscript or reviewer does not exist
    /// - `Err(AppError::BadRequest)` - Reviewer lacks the reviewer role, is the
    ///   submitter, or the manuscript is not open for review
    /// - `Err(AppError::Conflict)` - Reviewer is already assigned
    pub async fn assign(&self, params: AssignReviewerParams) -> Result<Review, AppError> {
        let manuscript_service = ManuscriptService::new(self.db);
        let manuscript = manuscript_service.get(params.manuscript_id).await?;

        if !matches!(
            manuscript.status,
            ManuscriptStatus::Submitted
                | ManuscriptStatus::UnderReview
                | ManuscriptStatus::RevisionRequested
        ) {
            return Err(AppError::BadRequest(format!(
                "Manuscript in status {} cannot be reviewed",
                manuscript.status.as_str()
            )));
        }

        let Some((reviewer, roles)) = UserRepository::new(self.db)
            .find_by_id(params.reviewer_id)
            .await?
        else {
            return Err(AppError::NotFound("Reviewer not found".to_string()));
        };
        let reviewer = User::from_entity(reviewer, roles)?;

        if !reviewer.roles.contains(Role::Reviewer) {
            return Err(AppError::BadRequest(
                "User does not hold the reviewer role".to_string(),
            ));
        }
        if reviewer.id == manuscript.submitter_id {
            return Err(AppError::BadRequest(
                "Submitters cannot review their own manuscript".to_string(),
            ));
        }

        let repo = ReviewRepository::new(self.db);
        if repo.is_assigned(manuscript.id, reviewer.id).await? {
            return Err(AppError::Conflict(
                "Reviewer is already assigned to this manuscript".to_string(),
            ));
        }

        let review = Review::from_entity(repo.create(&params).await?)?;

        NotificationService::new(self.db)
            .notify(
                reviewer.id,
                NotificationKind::ReviewAssigned,
                format!("You have been asked to review \"{}\"", manuscript.title),
                Some(manuscript.id),
            )
            .await?;

        if manuscript.status == ManuscriptStatus::Submitted {
            manuscript_service
                .update_status(manuscript.id, ManuscriptStatus::UnderReview)
                .await?;
        }

        Ok(review)
    }

    /// Lists every review of a manuscript.
    pub async fn get_for_manuscript(&self, manuscript_id: i32) -> Result<Vec<Review>, AppError> {
        ManuscriptService::new(self.db).get(manuscript_id).await?;

        ReviewRepository::new(self.db)
            .get_by_manuscript(manuscript_id)
            .await?
            .into_iter()
            .map(Review::from_entity)
            .collect()
    }

    /// Records the assigned reviewer's submission or decline.
    ///
    /// # Returns
    /// - `Ok(Review)` - Updated review
    /// - `Err(AppError::NotFound)` - No review with that ID
    /// - `Err(AppError::AuthErr)` - User is not the assigned reviewer
    /// - `Err(AppError::Conflict)` - Review was already answered
    pub async fn respond(
        &self,
        review_id: i32,
        reviewer_id: i32,
        params: ReviewResponseParams,
    ) -> Result<Review, AppError> {
        let repo = ReviewRepository::new(self.db);

        let Some(review) = repo.find_by_id(review_id).await? else {
            return Err(AppError::NotFound("Review not found".to_string()));
        };
        let review = Review::from_entity(review)?;

        if review.reviewer_id != reviewer_id {
            return Err(AuthError::AccessDenied(
                reviewer_id,
                format!("User is not the reviewer of review {}", review_id),
            )
            .into());
        }
        if review.status != ReviewStatus::Assigned {
            return Err(AppError::Conflict(
                "Review has already been answered".to_string(),
            ));
        }

        let updated = repo.respond(review_id, &params).await?;

        tracing::info!(
            "Review {} for manuscript {} {}",
            review_id,
            review.manuscript_id,
            params.status.as_str()
        );

        Review::from_entity(updated)
    }
}
