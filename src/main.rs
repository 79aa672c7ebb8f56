mod model;
mod server;

use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    router,
    scheduler::payment_expiry,
    service::{admin::code::AdminCodeService, doi::format::DoiFormat},
    startup,
    state::{AppState, OAuthSettings},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let payment_gateway = startup::setup_payment_gateway(&config, &http_client);

    let admin_code_service = AdminCodeService::new();

    tracing::info!("Starting server");

    startup::check_for_admin(&db, &config, &admin_code_service).await?;

    let scheduler_db = db.clone();
    let scheduler_gateway = payment_gateway.clone();
    let payment_ttl_days = config.payment_ttl_days;
    tokio::spawn(async move {
        if let Err(e) =
            payment_expiry::start_scheduler(scheduler_db, scheduler_gateway, payment_ttl_days)
                .await
        {
            tracing::error!("Payment expiry scheduler error: {}", e);
        }
    });

    let origin = config
        .app_url
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let state = AppState {
        db,
        http_client,
        oauth_client,
        oauth_settings: OAuthSettings {
            userinfo_url: config.oauth_userinfo_url.clone(),
            scopes: config.oauth_scopes.clone(),
        },
        admin_code_service,
        doi_format: DoiFormat::new(config.doi_prefix.clone(), config.doi_journal_code.clone()),
        payment_gateway,
        app_url: config.app_url.clone(),
    };

    let (api, openapi) = router::router();
    let app = api
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi))
        .with_state(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
