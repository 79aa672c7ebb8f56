use super::*;

/// Tests the authorize redirect.
///
/// Expected: URL carries the configured scopes and the CSRF state
#[tokio::test]
async fn builds_authorize_url() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let oauth_client = oauth_client();
    let settings = settings();

    let (url, state) = AuthService::new(db, &http_client, &oauth_client, &settings).login_url();

    assert!(url.as_str().starts_with("https://id.example.org/authorize"));
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(query.contains(&("scope".to_string(), "openid email".to_string())));
    assert!(query.contains(&("state".to_string(), state.secret().clone())));

    Ok(())
}
