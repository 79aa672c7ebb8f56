use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginationParams},
        user::{PaginatedUsersDto, Role, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::user::UserService,
        state::AppState,
    },
};

pub static ADMIN_TAG: &str = "admin";

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Users ordered by name", body = PaginatedUsersDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db)
        .get_all_users(pagination.page, pagination.entries)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/roles/{role}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        ("role" = Role, Path, description = "Role to grant")
    ),
    responses(
        (status = 200, description = "Role granted", body = UserDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grant_role(
    State(state): State<AppState>,
    session: Session,
    Path((id, role)): Path<(i32, Role)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db).grant_role(id, role).await?;


    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Revokes a role. The user's last role cannot be revoked; revoking the active
/// role switches the user to their most privileged remaining role.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}/roles/{role}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        ("role" = Role, Path, description = "Role to revoke")
    ),
    responses(
        (status = 200, description = "Role revoked", body = UserDto),
        (status = 400, description = "Role not held or the user's last role", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn revoke_role(
    State(state): State<AppState>,
    session: Session,
    Path((id, role)): Path<(i32, Role)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db).revoke_role(id, role).await?;


    Ok((StatusCode::OK, Json(user.into_dto())))
}
