use super::*;

/// Tests replacing a user's roles.
///
/// Verifies that old role rows are removed, new ones written and the active role
/// stored on the user row.
///
/// Expected: Ok with exactly the new role rows
#[tokio::test]
async fn replaces_role_rows_and_active_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user_with_roles(db, &["author", "reviewer"]).await?;

    let roles = RoleSet::new([Role::Author, Role::Editor], Role::Editor).unwrap();
    let repo = UserRepository::new(db);
    repo.save_roles(user.id, &roles).await?;

    let (stored, role_rows) = repo.find_by_id(user.id).await?.unwrap();
    let mut names: Vec<_> = role_rows.into_iter().map(|r| r.role).collect();
    names.sort();

    assert_eq!(stored.active_role, "editor");
    assert_eq!(names, vec!["author".to_string(), "editor".to_string()]);

    Ok(())
}

/// Tests that other users' roles are untouched.
///
/// Expected: Ok with the second user's roles unchanged
#[tokio::test]
async fn leaves_other_users_alone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::user::create_user_with_roles(db, &["author", "admin"]).await?;

    let repo = UserRepository::new(db);
    repo.save_roles(first.id, &RoleSet::new([Role::Reviewer], Role::Reviewer).unwrap())
        .await?;

    let (_, role_rows) = repo.find_by_id(second.id).await?.unwrap();
    assert_eq!(role_rows.len(), 2);

    Ok(())
}
