use super::*;

/// Tests paging through users.
///
/// Expected: page sizes and total pages computed from the user count
#[tokio::test]
async fn paginates_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_user(db).await?;
    }
    let service = UserService::new(db);

    let first = service.get_all_users(0, 2).await?;
    let last = service.get_all_users(2, 2).await?;

    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.users.len(), 2);
    assert_eq!(last.users.len(), 1);

    Ok(())
}
