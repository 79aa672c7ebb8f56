//! Peer review domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::review::{Recommendation, ReviewDto, ReviewStatus, UpdateReviewDto},
    server::error::{internal::InternalError, AppError},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub manuscript_id: i32,
    pub reviewer_id: i32,
    pub status: ReviewStatus,
    pub recommendation: Option<Recommendation>,
    pub comments: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model) -> Result<Self, AppError> {
        let status = ReviewStatus::parse(&entity.status).ok_or_else(|| {
            InternalError::UnknownEnumValue {
                field: "review.status",
                value: entity.status.clone(),
            }
        })?;
        let recommendation = match entity.recommendation {
            Some(value) => Some(Recommendation::parse(&value).ok_or(
                InternalError::UnknownEnumValue {
                    field: "review.recommendation",
                    value,
                },
            )?),
            None => None,
        };

        Ok(Self {
            id: entity.id,
            manuscript_id: entity.manuscript_id,
            reviewer_id: entity.reviewer_id,
            status,
            recommendation,
            comments: entity.comments,
            due_date: entity.due_date,
            created_at: entity.created_at,
            submitted_at: entity.submitted_at,
        })
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            manuscript_id: self.manuscript_id,
            reviewer_id: self.reviewer_id,
            status: self.status,
            recommendation: self.recommendation,
            comments: self.comments,
            due_date: self.due_date,
            created_at: self.created_at,
            submitted_at: self.submitted_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignReviewerParams {
    pub manuscript_id: i32,
    pub reviewer_id: i32,
    pub due_date: Option<DateTime<Utc>>,
}

/// Reviewer's answer to an assignment.
#[derive(Debug, Clone)]
pub struct ReviewResponseParams {
    pub status: ReviewStatus,
    pub recommendation: Option<Recommendation>,
    pub comments: Option<String>,
}

impl ReviewResponseParams {
    pub fn from_dto(dto: UpdateReviewDto) -> Self {
        match dto {
            UpdateReviewDto::Submit {
                recommendation,
                comments,
            } => Self {
                status: ReviewStatus::Submitted,
                recommendation: Some(recommendation),
                comments,
            },
            UpdateReviewDto::Decline { comments } => Self {
                status: ReviewStatus::Declined,
                recommendation: None,
                comments,
            },
        }
    }
}
