use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    service::{admin::code::AdminCodeService, payment::gateway::StripeClient},
    state::OAuth2Client,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions expire after 7 days of inactivity. Cookies are marked secure when the
/// application is served over HTTPS.
///
/// # Arguments
/// - `db` - Connected database whose SQLite pool stores sessions
/// - `config` - Application configuration providing the app URL
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to wrap the router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session_layer)
}

/// Builds the HTTP client used for provider and gateway calls.
///
/// Redirects are disabled so a malicious upstream cannot bounce requests to
/// internal addresses.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client from the configured provider endpoints.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorize, token and redirect URLs set
/// - `Err(AppError::ConfigErr)` - One of the configured URLs is not a valid URL
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.oauth_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.oauth_client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(config.oauth_auth_url.clone())
                .map_err(|e| invalid_url("OAUTH_AUTH_URL", e))?,
        )
        .set_token_uri(
            TokenUrl::new(config.oauth_token_url.clone())
                .map_err(|e| invalid_url("OAUTH_TOKEN_URL", e))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(config.oauth_redirect_url.clone())
                .map_err(|e| invalid_url("APP_URL", e))?,
        );

    Ok(client)
}

/// Creates the payment gateway client when a secret key is configured.
pub fn setup_payment_gateway(
    config: &Config,
    http_client: &reqwest::Client,
) -> Option<StripeClient> {
    match &config.stripe_secret_key {
        Some(secret_key) => Some(StripeClient::new(
            http_client.clone(),
            config.stripe_api_url.clone(),
            secret_key.clone(),
        )),
        None => {
            tracing::warn!("STRIPE_SECRET_KEY is not set, payment checkout is disabled");
            None
        }
    }
}

/// Logs a one-time admin login link when no admin exists.
///
/// Generates a bootstrap code valid for 60 seconds; logging in through the link
/// grants the `admin` role to the authenticating user.
///
/// # Returns
/// - `Ok(())` - An admin exists or the link was logged
/// - `Err(AppError::DbErr)` - Failed to query for admins
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if user_repo.admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.generate().await;

    tracing::info!(
        "No admin user found. Log in within 60 seconds to become admin: \
         {}/api/auth/login?admin_code={}",
        config.app_url,
        code
    );

    Ok(())
}

fn invalid_url(name: &str, err: url::ParseError) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: err.to_string(),
    }
}
