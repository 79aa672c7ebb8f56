//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client for external API requests
//! - OAuth2 client for provider authentication
//! - Admin code service for temporary admin access
//! - DOI format used for generating and parsing identifiers
//! - Optional payment gateway client
//! - Application URL for generating links

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use super::service::{
    admin::code::AdminCodeService, doi::format::DoiFormat, payment::gateway::StripeClient,
};

/// Type alias for the OAuth2 client configured with authorize and token endpoints.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Settings for the OAuth2 login flow that the client itself does not carry.
#[derive(Clone)]
pub struct OAuthSettings {
    /// Endpoint returning the authenticated user's profile.
    pub userinfo_url: String,
    /// Scopes requested on the authorize redirect.
    pub scopes: Vec<String>,
}

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - `AdminCodeService` uses `Arc` for shared state
/// - `StripeClient` wraps a `reqwest::Client` and its key
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for making external API requests.
    ///
    /// Configured with security settings (no redirects) to prevent SSRF
    /// vulnerabilities.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the login flow.
    pub oauth_client: OAuth2Client,

    pub oauth_settings: OAuthSettings,

    /// Service for managing temporary admin codes.
    ///
    /// Used to generate and validate temporary admin codes that allow the first
    /// user to gain admin access when no admin users exist in the database.
    pub admin_code_service: AdminCodeService,

    /// Prefix and journal code for DOIs minted by this deployment.
    pub doi_format: DoiFormat,

    /// Checkout gateway, `None` when payments are not configured.
    pub payment_gateway: Option<StripeClient>,

    /// Application base URL for generating links.
    ///
    /// Used to construct OAuth2 callbacks and checkout return URLs.
    pub app_url: String,
}
