use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        doi::{DoiParseDto, DoiQuery, DoiUniqueDto, DoiUniqueQuery, DoiValidationDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::doi::DoiOwner,
        service::doi::DoiService,
        state::AppState,
    },
};

pub static DOI_TAG: &str = "doi";

#[utoipa::path(
    get,
    path = "/api/doi/validate",
    tag = DOI_TAG,
    params(DoiQuery),
    responses(
        (status = 200, description = "Whether the DOI matches the format", body = DoiValidationDto)
    ),
)]
pub async fn validate(
    State(state): State<AppState>,
    Query(query): Query<DoiQuery>,
) -> impl IntoResponse {
    let valid = DoiService::new(&state.db, &state.doi_format).validate(&query.doi);

    (
        StatusCode::OK,
        Json(DoiValidationDto {
            doi: query.doi,
            valid,
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/doi/parse",
    tag = DOI_TAG,
    params(DoiQuery),
    responses(
        (status = 200, description = "Parsed components or null", body = DoiParseDto)
    ),
)]
pub async fn parse(
    State(state): State<AppState>,
    Query(query): Query<DoiQuery>,
) -> impl IntoResponse {
    let parsed = DoiService::new(&state.db, &state.doi_format)
        .parse(&query.doi)
        .map(|p| p.into_dto());

    (
        StatusCode::OK,
        Json(DoiParseDto {
            doi: query.doi,
            parsed,
        }),
    )
}

/// Checks whether a DOI is unused, optionally ignoring one manuscript's or
/// correction's own DOI.
#[utoipa::path(
    get,
    path = "/api/doi/unique",
    tag = DOI_TAG,
    params(DoiUniqueQuery),
    responses(
        (status = 200, description = "Uniqueness result", body = DoiUniqueDto),
        (status = 400, description = "Both exclusions given", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an editor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_unique(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DoiUniqueQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Editor])
        .await?;

    let exclude = match (query.exclude_manuscript, query.exclude_correction) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Only one of exclude_manuscript and exclude_correction may be set".to_string(),
            ))
        }
        (Some(id), None) => Some(DoiOwner::Manuscript(id)),
        (None, Some(id)) => Some(DoiOwner::Correction(id)),
        (None, None) => None,
    };

    let unique = DoiService::new(&state.db, &state.doi_format)
        .is_doi_unique(&query.doi, exclude)
        .await?;

    Ok((
        StatusCode::OK,
        Json(DoiUniqueDto {
            doi: query.doi,
            unique,
        }),
    ))
}
