use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID is stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No user is logged in for this session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    ///
    /// Results in a 401 Unauthorized response so the client logs in again.
    #[error("User {0} from session does not exist in the database")]
    UserNotInDatabase(i32),

    /// The user lacks the role required by the endpoint.
    ///
    /// The second field is logged but never returned to the client.
    /// Results in a 403 Forbidden response.
    #[error("User {0} was denied access: {1}")]
    AccessDenied(i32, String),

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// No CSRF token was stored in the session when the callback arrived.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to missing CSRF state in session")]
    CsrfMissingValue,

    /// Exchanging the authorization code for an access token failed.
    ///
    /// Results in a 500 Internal Server Error response.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// The identity provider's userinfo response carried no usable subject.
    ///
    /// Results in a 500 Internal Server Error response.
    #[error("Userinfo response did not contain a subject identifier")]
    MissingSubject,
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
/// - `CsrfValidationFailed` / `CsrfMissingValue` → 400 Bad Request
/// - Provider failures → 500 Internal Server Error with generic message
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in")
            }
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            Self::CsrfValidationFailed | Self::CsrfMissingValue => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::TokenExchange(_) | Self::MissingSubject => {
                tracing::error!("Login failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
