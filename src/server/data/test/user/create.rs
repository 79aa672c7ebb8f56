use super::*;

/// Tests creating a user with a single default role.
///
/// Verifies that the user row stores the active role and exactly one role row
/// is written.
///
/// Expected: Ok with one `author` role row
#[tokio::test]
async fn creates_user_with_author_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let (user, roles) = repo
        .create(
            "sub-1".to_string(),
            "Ada".to_string(),
            Some("ada@example.org".to_string()),
            &RoleSet::author(),
        )
        .await?;

    assert_eq!(user.provider_id, "sub-1");
    assert_eq!(user.active_role, "author");
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role, "author");
    assert_eq!(roles[0].user_id, user.id);

    Ok(())
}

/// Tests creating a user holding several roles.
///
/// Expected: Ok with one role row per role
#[tokio::test]
async fn creates_one_row_per_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let roles = RoleSet::new([Role::Author, Role::Admin], Role::Admin).unwrap();
    let (user, role_rows) = UserRepository::new(db)
        .create("sub-2".to_string(), "Root".to_string(), None, &roles)
        .await?;

    assert_eq!(user.active_role, "admin");
    assert_eq!(role_rows.len(), 2);

    Ok(())
}

/// Tests that the provider ID is unique.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_provider_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create("dup".to_string(), "One".to_string(), None, &RoleSet::author())
        .await?;
    let result = repo
        .create("dup".to_string(), "Two".to_string(), None, &RoleSet::author())
        .await;

    assert!(result.is_err());

    Ok(())
}
