use super::*;

/// Tests finding a user with its roles by provider subject.
///
/// Expected: Ok(Some) with the factory's role rows
#[tokio::test]
async fn finds_user_with_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .provider_id("provider-42")
        .roles(&["author", "reviewer"])
        .build()
        .await?;

    let result = UserRepository::new(db)
        .find_by_provider_id("provider-42")
        .await?;

    let (user, roles) = result.unwrap();
    assert_eq!(user.id, created.id);
    let mut names: Vec<_> = roles.into_iter().map(|r| r.role).collect();
    names.sort();
    assert_eq!(names, vec!["author".to_string(), "reviewer".to_string()]);

    Ok(())
}

/// Tests lookup of an unknown provider subject.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_subject() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let result = UserRepository::new(db).find_by_provider_id("missing").await?;

    assert!(result.is_none());

    Ok(())
}
