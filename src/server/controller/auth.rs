use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, CsrfSession, OAuthFlowSession},
        },
        service::auth::AuthService,
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginParams {
    /// One-time bootstrap code printed at startup when no admin exists.
    pub admin_code: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code exchanged for an access token.
    pub code: String,
}

/// Redirects to the identity provider.
///
/// A valid `admin_code` marks the login flow so the authenticating user is granted
/// the admin role on callback.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    params(LoginParams),
    responses(
        (status = 307, description = "Redirect to the identity provider"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.oauth_settings,
    );

    if let Some(code) = params.admin_code {
        let valid = state.admin_code_service.validate_and_consume(&code).await;
        if !valid {
            tracing::warn!("Rejected invalid or expired admin code");
        }
        OAuthFlowSession::new(&session).set_admin_flag(valid).await?;
    }

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Logged in, redirect to the application"),
        (status = 400, description = "CSRF state missing or mismatched", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.oauth_settings,
    );

    validate_csrf(&session, &params.state).await?;

    let grant_admin = OAuthFlowSession::new(&session).take_admin_flag().await?;
    let user = auth_service.callback(params.code, grant_admin).await?;

    let auth_session = AuthSession::new(&session);
    auth_session.clear().await;
    auth_session.set_user_id(user.id).await?;

    tracing::info!("User {} logged in", user.id);

    Ok(Redirect::temporary(&state.app_url))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Session cleared, redirect to the application")
    ),
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::temporary(&state.app_url)
}

#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let Some(stored) = CsrfSession::new(session).take_token().await? else {
        return Err(AuthError::CsrfMissingValue.into());
    };

    if stored != csrf_state {
        return Err(AuthError::CsrfValidationFailed.into());
    }

    Ok(())
}
