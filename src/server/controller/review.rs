use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        review::{AssignReviewerDto, ReviewDto, UpdateReviewDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::review::{AssignReviewerParams, ReviewResponseParams},
        service::review::ReviewService,
        state::AppState,
    },
};

pub static REVIEW_TAG: &str = "review";

/// Assigns a reviewer. A submitted manuscript moves to under review.
#[utoipa::path(
    post,
    path = "/api/manuscripts/{id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    request_body = AssignReviewerDto,
    responses(
        (status = 201, description = "Reviewer assigned", body = ReviewDto),
        (status = 400, description = "Reviewer or manuscript not eligible", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Manuscript or reviewer not found", body = ErrorDto),
        (status = 409, description = "Reviewer already assigned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<AssignReviewerDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let review = ReviewService::new(&state.db)
        .assign(AssignReviewerParams {
            manuscript_id: id,
            reviewer_id: payload.reviewer_id,
            due_date: payload.due_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/manuscripts/{id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    responses(
        (status = 200, description = "Reviews of the manuscript", body = Vec<ReviewDto>),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let reviews: Vec<ReviewDto> = ReviewService::new(&state.db)
        .get_for_manuscript(id)
        .await?
        .into_iter()
        .map(|r| r.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(reviews)))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review submitted or declined", body = ReviewDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not the assigned reviewer", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 409, description = "Review already answered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn respond(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let reviewer = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Review])
        .await?;

    let review = ReviewService::new(&state.db)
        .respond(id, reviewer.id, ReviewResponseParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}
