use super::*;

/// Tests the first login of a new user.
///
/// Expected: user created with only the author role
#[tokio::test]
async fn registers_new_user_as_author() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let oauth_client = oauth_client();
    let settings = settings();

    let user = AuthService::new(db, &http_client, &oauth_client, &settings)
        .upsert_user(login("sub-1", false))
        .await?;

    assert_eq!(user.provider_id, "sub-1");
    assert_eq!(user.roles.roles().collect::<Vec<_>>(), vec![Role::Author]);
    assert_eq!(user.roles.active(), Role::Author);

    Ok(())
}

/// Tests a first login carrying a valid bootstrap admin code.
///
/// Expected: user holds author and admin, acting as admin
#[tokio::test]
async fn registers_bootstrap_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let oauth_client = oauth_client();
    let settings = settings();

    let user = AuthService::new(db, &http_client, &oauth_client, &settings)
        .upsert_user(login("sub-1", true))
        .await?;

    assert!(user.roles.contains(Role::Author));
    assert!(user.roles.contains(Role::Admin));
    assert_eq!(user.roles.active(), Role::Admin);

    Ok(())
}

/// Tests a returning user.
///
/// Expected: same user, profile refreshed, roles kept
#[tokio::test]
async fn refreshes_returning_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let oauth_client = oauth_client();
    let settings = settings();

    let existing = factory::user::UserFactory::new(db)
        .provider_id("sub-1")
        .name("Old Name")
        .roles(&["author", "editor"])
        .active_role("editor")
        .build()
        .await?;

    let user = AuthService::new(db, &http_client, &oauth_client, &settings)
        .upsert_user(login("sub-1", false))
        .await?;

    assert_eq!(user.id, existing.id);
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.email.as_deref(), Some("ada@example.org"));
    assert!(user.roles.contains(Role::Editor));
    assert_eq!(user.roles.active(), Role::Editor);

    Ok(())
}

/// Tests a returning user logging in with a bootstrap admin code.
///
/// Expected: admin granted and active, other roles kept
#[tokio::test]
async fn grants_admin_to_returning_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let oauth_client = oauth_client();
    let settings = settings();

    factory::user::UserFactory::new(db)
        .provider_id("sub-1")
        .roles(&["author", "reviewer"])
        .build()
        .await?;

    let user = AuthService::new(db, &http_client, &oauth_client, &settings)
        .upsert_user(login("sub-1", true))
        .await?;

    assert!(user.roles.contains(Role::Reviewer));
    assert!(user.roles.contains(Role::Admin));
    assert_eq!(user.roles.active(), Role::Admin);

    Ok(())
}
