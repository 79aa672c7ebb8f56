use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, payment::PaymentDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::payment::PaymentService,
        state::AppState,
    },
};

pub static PAYMENT_TAG: &str = "payment";

/// Starts payment of the publication fee.
///
/// Waived fees are recorded as settled immediately; otherwise a checkout session is
/// opened and its URL returned.
#[utoipa::path(
    post,
    path = "/api/manuscripts/{id}/payment",
    tag = PAYMENT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    responses(
        (status = 201, description = "Payment created", body = PaymentDto),
        (status = 400, description = "Manuscript not payable", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not the submitter", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 409, description = "Open or settled payment exists", body = ErrorDto),
        (status = 503, description = "Fees or payment gateway not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let payment = PaymentService::new(&state.db, state.payment_gateway.as_ref())
        .create_for_manuscript(id, &user, &state.app_url)
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/payments/{id}/confirm",
    tag = PAYMENT_TAG,
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment with current status", body = PaymentDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not the payer or an admin", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 503, description = "Payment gateway not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let payment = PaymentService::new(&state.db, state.payment_gateway.as_ref())
        .confirm(id, &user)
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/manuscripts/{id}/payments",
    tag = PAYMENT_TAG,
    params(
        ("id" = i32, Path, description = "Manuscript ID")
    ),
    responses(
        (status = 200, description = "Payments of the manuscript", body = Vec<PaymentDto>),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not the submitter or an editor", body = ErrorDto),
        (status = 404, description = "Manuscript not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let payments: Vec<PaymentDto> = PaymentService::new(&state.db, state.payment_gateway.as_ref())
        .get_for_manuscript(id, &user)
        .await?
        .into_iter()
        .map(|p| p.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(payments)))
}
