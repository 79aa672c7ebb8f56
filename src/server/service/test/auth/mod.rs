use crate::{
    model::user::Role,
    server::{
        error::AppError,
        model::user::UpsertUserParam,
        service::auth::AuthService,
        state::{OAuth2Client, OAuthSettings},
    },
};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use test_utils::{builder::TestBuilder, factory};

mod login_url;
mod upsert_user;

fn oauth_client() -> OAuth2Client {
    BasicClient::new(ClientId::new("journal".to_string()))
        .set_client_secret(ClientSecret::new("secret".to_string()))
        .set_auth_uri(AuthUrl::new("https://id.example.org/authorize".to_string()).unwrap())
        .set_token_uri(TokenUrl::new("https://id.example.org/token".to_string()).unwrap())
        .set_redirect_uri(
            RedirectUrl::new("http://localhost:8080/api/auth/callback".to_string()).unwrap(),
        )
}

fn settings() -> OAuthSettings {
    OAuthSettings {
        userinfo_url: "https://id.example.org/userinfo".to_string(),
        scopes: vec!["openid".to_string(), "email".to_string()],
    }
}

fn login(provider_id: &str, grant_admin: bool) -> UpsertUserParam {
    UpsertUserParam {
        provider_id: provider_id.to_string(),
        name: "Ada Lovelace".to_string(),
        email: Some("ada@example.org".to_string()),
        grant_admin,
    }
}
