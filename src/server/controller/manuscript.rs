use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        manuscript::{
            AssignIssueDto, CreateManuscriptDto, ManuscriptDto, ManuscriptListQuery, MetricKind,
            PaginatedManuscriptsDto, UpdateCopyEditingDto, UpdateStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::manuscript::CreateManuscriptParams,
        service::manuscript::ManuscriptService,
        state::AppState,
    },
};

pub static MANUSCRIPT_TAG: &str = "manuscript";

#[utoipa::path(
    post,
    path = "/api/manuscripts",
    tag = MANUSCRIPT_TAG,
    request_body = CreateManuscriptDto,
    responses(
        (status = 201, description = "Manuscript submitted", body = ManuscriptDto),
        (status = 400, description = "Invalid manuscript data", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an author", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateManuscriptDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Submit])
        .await?;

    let params = CreateManuscriptParams::from_dto(user.id, payload)?;
    let manuscript = ManuscriptService::new(&state.db).submit(params).await?;

    Ok((StatusCode::CREATED, Json(manuscript.into_dto())))
}

/// Lists the caller's own submissions, or every manuscript for editors.
#[utoipa::path(
    get,
    path = "/api/manuscripts",
    tag = MANUSCRIPT_TAG,
    params(ManuscriptListQuery),
    responses(
        (status = 200, description = "Manuscripts, newest first", body = PaginatedManuscriptsDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ManuscriptListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let manuscripts = ManuscriptService::new(&state.db)
        .list_for_user(&user, query.status, query.page, query.entries)
        .await?;

    Ok((StatusCode::OK, Json(manuscripts.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/manuscripts/{id}",
    tag = MANUSCRIPT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    responses(
        (status = 200, description = "Manuscript", body = ManuscriptDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User may not view this manuscript", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let manuscript = ManuscriptService::new(&state.db)
        .get_for_user(id, &user)
        .await?;

    Ok((StatusCode::OK, Json(manuscript.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/manuscripts/{id}/status",
    tag = MANUSCRIPT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ManuscriptDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let manuscript = ManuscriptService::new(&state.db)
        .update_status(id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(manuscript.into_dto())))
}

/// Moves the copy-editing stage. Copy editors and editors drive editing; only the
/// submitter approves their own manuscript.
#[utoipa::path(
    put,
    path = "/api/manuscripts/{id}/copy-editing",
    tag = MANUSCRIPT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    request_body = UpdateCopyEditingDto,
    responses(
        (status = 200, description = "Stage updated", body = ManuscriptDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User may not make this transition", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_copy_editing(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCopyEditingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let manuscript = ManuscriptService::new(&state.db)
        .update_copy_editing_stage(id, payload.stage, &user)
        .await?;

    Ok((StatusCode::OK, Json(manuscript.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/manuscripts/{id}/issue",
    tag = MANUSCRIPT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    request_body = AssignIssueDto,
    responses(
        (status = 200, description = "Manuscript assigned to the issue", body = ManuscriptDto),
        (status = 400, description = "Manuscript not accepted", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Manuscript or issue not found", body = ErrorDto),
        (status = 409, description = "Issue published or DOI taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_issue(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<AssignIssueDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let manuscript = ManuscriptService::new(&state.db)
        .assign_issue(id, payload.volume, payload.issue)
        .await?;

    Ok((StatusCode::OK, Json(manuscript.into_dto())))
}

/// Reserves the next DOI of the manuscript's issue and stores it.
#[utoipa::path(
    post,
    path = "/api/manuscripts/{id}/doi",
    tag = MANUSCRIPT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    responses(
        (status = 200, description = "DOI assigned", body = ManuscriptDto),
        (status = 400, description = "Manuscript has no issue", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 409, description = "Manuscript already has a DOI", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_doi(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let manuscript = ManuscriptService::new(&state.db)
        .assign_doi(id, &state.doi_format)
        .await?;

    Ok((StatusCode::OK, Json(manuscript.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/manuscripts/{id}/metrics/{metric}",
    tag = MANUSCRIPT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID"),
        ("metric" = MetricKind, Path, description = "Counter to increment")
    ),
    responses(
        (status = 204, description = "Counter incremented"),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_metric(
    State(state): State<AppState>,
    Path((id, metric)): Path<(i32, MetricKind)>,
) -> Result<impl IntoResponse, AppError> {
    ManuscriptService::new(&state.db)
        .record_metric(id, metric)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
