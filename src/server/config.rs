use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_OAUTH_SCOPES: &str = "openid profile email";
const DEFAULT_DOI_PREFIX: &str = "10.1578";
const DEFAULT_DOI_JOURNAL_CODE: &str = "gjadt";
const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";
const DEFAULT_PAYMENT_TTL_DAYS: i64 = 7;

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_address: String,

    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub oauth_userinfo_url: String,
    pub oauth_redirect_url: String,
    pub oauth_scopes: Vec<String>,

    pub doi_prefix: String,
    pub doi_journal_code: String,

    /// Payments are disabled when no secret key is configured.
    pub stripe_secret_key: Option<String>,
    pub stripe_api_url: String,
    pub payment_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_url = required("APP_URL")?.trim_end_matches('/').to_string();
        let oauth_redirect_url = format!("{}/api/auth/callback", app_url);

        let payment_ttl_days = match optional("PAYMENT_TTL_DAYS") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: "PAYMENT_TTL_DAYS".to_string(),
                    reason: format!("'{}' is not a positive number of days", value),
                })?,
            None => DEFAULT_PAYMENT_TTL_DAYS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            oauth_client_id: required("OAUTH_CLIENT_ID")?,
            oauth_client_secret: required("OAUTH_CLIENT_SECRET")?,
            oauth_auth_url: required("OAUTH_AUTH_URL")?,
            oauth_token_url: required("OAUTH_TOKEN_URL")?,
            oauth_userinfo_url: required("OAUTH_USERINFO_URL")?,
            oauth_redirect_url,
            oauth_scopes: optional("OAUTH_SCOPES")
                .unwrap_or_else(|| DEFAULT_OAUTH_SCOPES.to_string())
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            doi_prefix: optional("DOI_PREFIX").unwrap_or_else(|| DEFAULT_DOI_PREFIX.to_string()),
            doi_journal_code: optional("DOI_JOURNAL_CODE")
                .unwrap_or_else(|| DEFAULT_DOI_JOURNAL_CODE.to_string()),
            stripe_secret_key: optional("STRIPE_SECRET_KEY"),
            stripe_api_url: optional("STRIPE_API_URL")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_URL.to_string()),
            payment_ttl_days,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads an optional variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
