use super::*;
use chrono::{Duration, Utc};

/// Tests listing pending payments created before a cutoff.
///
/// Expected: Ok with only the stale pending payment
#[tokio::test]
async fn finds_stale_pending_payments() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let old = Utc::now() - Duration::days(10);

    let stale = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .created_at(old)
        .build()
        .await?;
    factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("completed")
        .created_at(old)
        .build()
        .await?;
    factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;

    let pending = PaymentRepository::new(db)
        .find_pending_before(Utc::now() - Duration::days(7))
        .await?;

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, stale.id);
    assert_eq!(pending[0].status, "pending");

    Ok(())
}

/// Tests expiring a pending payment.
///
/// Expected: Ok(Some) with the expired row
#[tokio::test]
async fn expires_pending_payment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;

    let expired = PaymentRepository::new(db).expire(payment.id).await?;

    assert_eq!(expired.map(|p| p.status).as_deref(), Some("expired"));

    Ok(())
}

/// Tests that a payment settled in the meantime is not expired.
///
/// Expected: Ok(None) and the payment still completed
#[tokio::test]
async fn leaves_settled_payment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("completed")
        .build()
        .await?;
    let repo = PaymentRepository::new(db);

    let expired = repo.expire(payment.id).await?;

    assert!(expired.is_none());
    assert_eq!(repo.find_by_id(payment.id).await?.unwrap().status, "completed");

    Ok(())
}

/// Tests completing pending and expired payments.
///
/// Expected: Ok(true) for both with the payment intent stored
#[tokio::test]
async fn completes_pending_and_expired() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let pending = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;
    let expired = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("expired")
        .build()
        .await?;
    let repo = PaymentRepository::new(db);

    assert!(repo.mark_completed(pending.id, Some("pi_1".to_string())).await?);
    assert!(repo.mark_completed(expired.id, None).await?);

    let pending = repo.find_by_id(pending.id).await?.unwrap();
    assert_eq!(pending.status, "completed");
    assert_eq!(pending.stripe_payment_intent.as_deref(), Some("pi_1"));
    assert_eq!(repo.find_by_id(expired.id).await?.unwrap().status, "completed");

    Ok(())
}

/// Tests that completed and refunded payments are not completed again.
///
/// Expected: Ok(false) and statuses unchanged
#[tokio::test]
async fn skips_settled_payments() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let completed = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("completed")
        .build()
        .await?;
    let refunded = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("refunded")
        .build()
        .await?;
    let repo = PaymentRepository::new(db);

    assert!(!repo.mark_completed(completed.id, Some("pi_2".to_string())).await?);
    assert!(!repo.mark_completed(refunded.id, None).await?);
    assert_eq!(repo.find_by_id(refunded.id).await?.unwrap().status, "refunded");

    Ok(())
}
