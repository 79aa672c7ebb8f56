//! OAuth2 login against the configured identity provider.

use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use url::Url;

use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::{RoleSet, UpsertUserParam, User},
        state::{OAuth2Client, OAuthSettings},
    },
};

/// Profile returned by the provider's userinfo endpoint.
///
/// OpenID Connect providers send `sub`; others (e.g. GitHub) send a numeric `id`.
#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: Option<String>,
    id: Option<serde_json::Value>,
    name: Option<String>,
    preferred_username: Option<String>,
    login: Option<String>,
    email: Option<String>,
}

impl UserInfo {
    fn subject(&self) -> Option<String> {
        if let Some(sub) = self.sub.as_ref().filter(|s| !s.is_empty()) {
            return Some(sub.clone());
        }

        match self.id.as_ref()? {
            serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
            serde_json::Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    fn display_name(&self) -> String {
        self.name
            .as_ref()
            .or(self.preferred_username.as_ref())
            .or(self.login.as_ref())
            .filter(|n| !n.trim().is_empty())
            .map(|n| n.trim().to_string())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Unnamed user".to_string())
    }
}

/// Service for OAuth2 authentication.
///
/// Handles the authorize redirect, the code exchange and the local user record
/// created or refreshed on every login.
pub struct AuthService<'a> {
    /// Database connection for user operations.
    pub db: &'a DatabaseConnection,
    /// HTTP client for provider requests.
    pub http_client: &'a reqwest::Client,
    /// OAuth2 client for the authentication flow.
    pub oauth_client: &'a OAuth2Client,
    pub settings: &'a OAuthSettings,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http_client` - Reference to the HTTP client for provider requests
    /// - `oauth_client` - Reference to the configured OAuth2 client
    /// - `settings` - Userinfo endpoint and requested scopes
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        settings: &'a OAuthSettings,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            settings,
        }
    }

    /// Generates the provider login URL with CSRF protection.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Tuple containing the authorization URL and CSRF state token
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let scopes = self
            .settings
            .scopes
            .iter()
            .map(|scope| Scope::new(scope.clone()));

        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(scopes)
            .url()
    }

    /// Handles the OAuth2 callback and authenticates the user.
    ///
    /// Exchanges the authorization code for an access token, fetches the provider
    /// profile and creates or refreshes the local user.
    ///
    /// # Arguments
    /// - `authorization_code` - OAuth2 authorization code from the callback
    /// - `grant_admin` - Whether a valid bootstrap admin code accompanied the login
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user
    /// - `Err(AppError::AuthErr)` - Token exchange failed or the profile had no subject
    /// - `Err(AppError::ReqwestErr)` - Failed to fetch the profile
    /// - `Err(AppError::DbErr)` - Database error during user upsert
    pub async fn callback(
        &self,
        authorization_code: String,
        grant_admin: bool,
    ) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let user_info = self
            .http_client
            .get(&self.settings.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, "journal")
            .send()
            .await?
            .error_for_status()?
            .json::<UserInfo>()
            .await?;

        let provider_id = user_info.subject().ok_or(AuthError::MissingSubject)?;

        self.upsert_user(UpsertUserParam {
            provider_id,
            name: user_info.display_name(),
            email: user_info.email,
            grant_admin,
        })
        .await
    }

    /// Creates the user on first login or refreshes its profile.
    ///
    /// New users receive the author role. With `grant_admin` the user also receives
    /// admin and acts as admin.
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError)` - Database error or corrupt role data
    pub async fn upsert_user(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let existing = user_repo.find_by_provider_id(&param.provider_id).await?;

        let (user, roles) = match existing {
            Some((user, roles)) => {
                let user = user_repo
                    .update_profile(user.id, param.name, param.email)
                    .await?;
                let mut current = User::from_entity(user.clone(), roles.clone())?;

                if param.grant_admin && !current.roles.contains(Role::Admin) {
                    current.roles.grant(Role::Admin);
                    current.roles.set_active(Role::Admin)?;
                    user_repo.save_roles(user.id, &current.roles).await?
                } else {
                    (user, roles)
                }
            }
            None => {
                let roles = if param.grant_admin {
                    RoleSet::new([Role::Author, Role::Admin], Role::Admin)?
                } else {
                    RoleSet::author()
                };

                let created = user_repo
                    .create(param.provider_id, param.name, param.email, &roles)
                    .await?;
                tracing::info!("Registered new user {}", created.0.id);
                created
            }
        };

        let user = User::from_entity(user, roles)?;

        if param.grant_admin {
            tracing::info!("User {} has been granted admin", user.name);
        }

        Ok(user)
    }
}
