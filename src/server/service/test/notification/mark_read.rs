use super::*;

/// Tests reading and filtering a user's notifications.
///
/// Expected: unread filter drops the read notification
#[tokio::test]
async fn marks_own_notification_read() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_manuscript_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = NotificationService::new(db);

    let user = factory::create_user(db).await?;
    let first = service
        .notify(user.id, NotificationKind::StatusChanged, "First".to_string(), None)
        .await?;
    service
        .notify(user.id, NotificationKind::StatusChanged, "Second".to_string(), None)
        .await?;

    service.mark_read(first.id, user.id).await?;

    let all = service.get_for_user(user.id, false).await?;
    let unread = service.get_for_user(user.id, true).await?;
    assert_eq!(all.len(), 2);
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].message, "Second");

    Ok(())
}

/// Tests marking another user's notification read.
///
/// Expected: Err(AppError::NotFound) and the notification stays unread
#[tokio::test]
async fn ignores_other_users_notification() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_manuscript_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = NotificationService::new(db);

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = service
        .notify(owner.id, NotificationKind::ReviewAssigned, "Review".to_string(), None)
        .await?;

    let result = service.mark_read(notification.id, other.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(service.get_for_user(owner.id, true).await?.len(), 1);

    Ok(())
}
