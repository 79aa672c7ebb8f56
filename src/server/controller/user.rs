use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        notification::NotificationDto,
        user::{SetActiveRoleDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::{notification::NotificationService, user::UserService},
        state::AppState,
    },
};

pub static USER_TAG: &str = "user";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// Switches the role the current user acts as.
#[utoipa::path(
    put,
    path = "/api/user/active-role",
    tag = USER_TAG,
    request_body = SetActiveRoleDto,
    responses(
        (status = 200, description = "Active role switched", body = UserDto),
        (status = 400, description = "Role not held by the user", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_active_role(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SetActiveRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let user = UserService::new(&state.db)
        .set_active_role(user.id, payload.role)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/user/notifications",
    tag = USER_TAG,
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications, newest first", body = Vec<NotificationDto>),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let notifications: Vec<NotificationDto> = NotificationService::new(&state.db)
        .get_for_user(user.id, query.unread_only)
        .await?
        .into_iter()
        .map(|n| n.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(notifications)))
}

#[utoipa::path(
    post,
    path = "/api/user/notifications/{id}/read",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Notification marked read"),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    NotificationService::new(&state.db)
        .mark_read(id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
