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
        correction::{CorrectionDto, CreateCorrectionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::correction::CreateCorrectionParams,
        service::correction::CorrectionService,
        state::AppState,
    },
};

pub static CORRECTION_TAG: &str = "correction";

#[utoipa::path(
    post,
    path = "/api/manuscripts/{id}/corrections",
    tag = CORRECTION_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    request_body = CreateCorrectionDto,
    responses(
        (status = 201, description = "Draft correction created", body = CorrectionDto),
        (status = 400, description = "Unpublished or empty description", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CreateCorrectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let editor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let params = CreateCorrectionParams::from_dto(id, editor.id, payload)?;
    let correction = CorrectionService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(correction.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/manuscripts/{id}/corrections",
    tag = CORRECTION_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    responses(
        (status = 200, description = "Corrections of the manuscript", body = Vec<CorrectionDto>),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let corrections: Vec<CorrectionDto> = CorrectionService::new(&state.db)
        .get_for_manuscript(id)
        .await?
        .into_iter()
        .map(|c| c.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(corrections)))
}

#[utoipa::path(
    post,
    path = "/api/corrections/{id}/publish",
    tag = CORRECTION_TAG,
    params(
        ("id" = i32, Path, description = "Correction ID")
    ),
    responses(
        (status = 200, description = "Correction published with its DOI", body = CorrectionDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 404, description = "Correction not found", body = ErrorDto),
        (status = 409, description = "Correction already published", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn publish(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let correction = CorrectionService::new(&state.db)
        .publish(id, &state.doi_format)
        .await?;

    Ok((StatusCode::OK, Json(correction.into_dto())))
}
