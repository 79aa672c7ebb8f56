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
        fee::{FeeConfigDto, FeeQuoteDto, FeeQuoteQuery, UpdateFeeConfigDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::fee::{FeeQuoteParams, FeeSchedule},
        service::fee::FeeService,
        state::AppState,
    },
};

pub static FEE_TAG: &str = "fee";

/// Quotes the publication fee for an article type, country and institution.
#[utoipa::path(
    get,
    path = "/api/fees/quote",
    tag = FEE_TAG,
    params(FeeQuoteQuery),
    responses(
        (status = 200, description = "Fee quote", body = FeeQuoteDto),
        (status = 503, description = "No fee configuration saved", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Query(query): Query<FeeQuoteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let quote = FeeService::new(&state.db)
        .quote(&FeeQuoteParams::from_dto(query))
        .await?;

    Ok((StatusCode::OK, Json(quote.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/fees",
    tag = FEE_TAG,
    responses(
        (status = 200, description = "Active fee configuration", body = FeeConfigDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 503, description = "No fee configuration saved", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_config(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let config = FeeService::new(&state.db).get_config().await?;

    Ok((StatusCode::OK, Json(config.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/fees",
    tag = FEE_TAG,
    request_body = UpdateFeeConfigDto,
    responses(
        (status = 200, description = "Fee configuration replaced", body = FeeConfigDto),
        (status = 400, description = "Invalid fee configuration", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_config(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateFeeConfigDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let config = FeeService::new(&state.db)
        .update_config(FeeSchedule::from_dto(payload), admin.id)
        .await?;

    Ok((StatusCode::OK, Json(config.into_dto())))
}
