use super::*;

/// Tests expiring payments left pending past the TTL.
///
/// Expected: only the stale payment expires and its payer is notified
#[tokio::test]
async fn expires_stale_pending_payments() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let stale = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .created_at(Utc::now() - Duration::days(10))
        .build()
        .await?;
    let fresh = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;

    let expired = PaymentService::new(db, None).expire_stale(7).await?;

    assert_eq!(expired, 1);
    let stale = entity::prelude::Payment::find_by_id(stale.id)
        .one(db)
        .await?
        .unwrap();
    let fresh = entity::prelude::Payment::find_by_id(fresh.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stale.status, "expired");
    assert_eq!(fresh.status, "pending");

    let notifications = entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(author.id))
        .all(db)
        .await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "payment_expired");
    assert!(notifications[0].message.contains("1500"));

    Ok(())
}

/// Tests that settled payments are never expired.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_settled_payments() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("completed")
        .created_at(Utc::now() - Duration::days(30))
        .build()
        .await?;

    let expired = PaymentService::new(db, None).expire_stale(7).await?;

    assert_eq!(expired, 0);

    Ok(())
}

/// Tests that a stale payment whose checkout was paid is completed, not expired.
///
/// Expected: Ok(0), payment completed with the session's payment intent, no notice
#[tokio::test]
async fn completes_paid_session_instead_of_expiring() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = checkout_stub("paid").await;

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let stale = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .session_id("cs_test_paid")
        .created_at(Utc::now() - Duration::days(10))
        .build()
        .await?;

    let expired = PaymentService::new(db, Some(&gateway))
        .expire_stale(7)
        .await?;

    assert_eq!(expired, 0);
    let stored = entity::prelude::Payment::find_by_id(stale.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.status, "completed");
    assert_eq!(stored.stripe_payment_intent.as_deref(), Some("pi_test_123"));
    let notifications = entity::prelude::Notification::find().all(db).await?;
    assert!(notifications.is_empty());

    Ok(())
}

/// Tests that an unpaid checkout session still expires.
///
/// Expected: Ok(1) and the payment expired
#[tokio::test]
async fn expires_unpaid_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = checkout_stub("unpaid").await;

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let stale = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .session_id("cs_test_unpaid")
        .created_at(Utc::now() - Duration::days(10))
        .build()
        .await?;

    let expired = PaymentService::new(db, Some(&gateway))
        .expire_stale(7)
        .await?;

    assert_eq!(expired, 1);
    let stored = entity::prelude::Payment::find_by_id(stale.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.status, "expired");

    Ok(())
}

/// Tests that a payment whose session cannot be read is left for the next run.
///
/// Expected: Ok(0) and the payment still pending
#[tokio::test]
async fn keeps_payment_when_session_lookup_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = StripeClient::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1".to_string(),
        "sk_test".to_string(),
    );

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let stale = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .session_id("cs_test_unreachable")
        .created_at(Utc::now() - Duration::days(10))
        .build()
        .await?;

    let expired = PaymentService::new(db, Some(&gateway))
        .expire_stale(7)
        .await?;

    assert_eq!(expired, 0);
    let stored = entity::prelude::Payment::find_by_id(stale.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.status, "pending");

    Ok(())
}
