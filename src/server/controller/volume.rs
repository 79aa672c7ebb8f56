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
        volume::{CreateIssueDto, CreateVolumeDto, IssueDto, PublishedIssueDto, VolumeDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::volume::{CreateIssueParams, CreateVolumeParams},
        service::volume::VolumeService,
        state::AppState,
    },
};

pub static VOLUME_TAG: &str = "volume";

#[utoipa::path(
    post,
    path = "/api/volumes",
    tag = VOLUME_TAG,
    request_body = CreateVolumeDto,
    responses(
        (status = 201, description = "Volume created", body = VolumeDto),
        (status = 400, description = "Invalid volume data", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 409, description = "Volume number in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_volume(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateVolumeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let volume = VolumeService::new(&state.db)
        .create_volume(CreateVolumeParams::from_dto(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(volume.into_dto(Vec::new()))))
}

#[utoipa::path(
    get,
    path = "/api/volumes",
    tag = VOLUME_TAG,
    responses(
        (status = 200, description = "Volumes with their issues", body = Vec<VolumeDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let volumes: Vec<VolumeDto> = VolumeService::new(&state.db)
        .get_all()
        .await?
        .into_iter()
        .map(|(volume, issues)| volume.into_dto(issues))
        .collect();

    Ok((StatusCode::OK, Json(volumes)))
}

#[utoipa::path(
    post,
    path = "/api/volumes/{id}/issues",
    tag = VOLUME_TAG,
    params(
        ("id" = i32, Path, description = "Volume ID")
    ),
    request_body = CreateIssueDto,
    responses(
        (status = 201, description = "Issue created", body = IssueDto),
        (status = 400, description = "Invalid issue data", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Volume not found", body = ErrorDto),
        (status = 409, description = "Issue number in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_issue(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CreateIssueDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let issue = VolumeService::new(&state.db)
        .create_issue(CreateIssueParams::from_dto(id, payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(issue.into_dto())))
}

/// Publishes an issue once every manuscript in it is approved by its author.
/// Manuscripts without a DOI receive one; each submitter is notified.
#[utoipa::path(
    post,
    path = "/api/issues/{id}/publish",
    tag = VOLUME_TAG,
    params(
        ("id" = i32, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue published", body = PublishedIssueDto),
        (status = 400, description = "Issue empty or manuscripts not approved", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Issue not found", body = ErrorDto),
        (status = 409, description = "Issue already published", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn publish_issue(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let (issue, manuscripts) = VolumeService::new(&state.db)
        .publish_issue(id, &state.doi_format)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PublishedIssueDto {
            issue: issue.into_dto(),
            manuscripts: manuscripts.into_iter().map(|m| m.into_dto()).collect(),
        }),
    ))
}
