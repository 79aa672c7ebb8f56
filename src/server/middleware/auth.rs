//! Role-based access checks for request handlers.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::user::Role,
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::user::User,
        service::user::UserService,
    },
};

/// Capability required by an endpoint.
///
/// Each permission is satisfied by a fixed set of roles; `Admin` satisfies every
/// permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Admin,
    Editor,
    Review,
    Submit,
}

impl Permission {
    fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::Admin => &[Role::Admin],
            Self::Editor => &[Role::Editor, Role::Admin],
            Self::Review => &[Role::Reviewer, Role::Admin],
            Self::Submit => &[Role::Author, Role::Admin],
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Review => "reviewer",
            Self::Submit => "author",
        }
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Loads the logged-in user and checks every permission against the roles it holds.
    ///
    /// An empty permission list only requires a logged-in user.
    ///
    /// # Returns
    /// - `Ok(User)` - User is logged in and holds a role for each permission
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - Session references a deleted user
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserService::new(self.db).get_user(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            if !user.roles.contains_any(permission.allowed_roles()) {
                return Err(AuthError::AccessDenied(
                    user_id,
                    format!("User lacks the {} role", permission.describe()),
                )
                .into());
            }
        }

        Ok(user)
    }
}
