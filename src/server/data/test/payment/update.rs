use super::*;

/// Tests attaching a checkout session and completing the payment.
///
/// Expected: session, URL and payment intent stored
#[tokio::test]
async fn records_checkout_and_completion() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;
    let repo = PaymentRepository::new(db);

    repo.attach_checkout(
        payment.id,
        "cs_test_123".to_string(),
        Some("https://checkout.example/cs_test_123".to_string()),
    )
    .await?;
    let updated = repo
        .update_status(
            payment.id,
            PaymentStatus::Completed,
            Some("pi_123".to_string()),
        )
        .await?;

    assert_eq!(updated.status, "completed");
    assert_eq!(updated.stripe_session_id.as_deref(), Some("cs_test_123"));
    assert_eq!(updated.stripe_payment_intent.as_deref(), Some("pi_123"));

    Ok(())
}

/// Tests that a status update without an intent keeps the stored one.
///
/// Expected: the previous payment intent survives
#[tokio::test]
async fn keeps_existing_intent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;
    let repo = PaymentRepository::new(db);

    repo.update_status(
        payment.id,
        PaymentStatus::Completed,
        Some("pi_456".to_string()),
    )
    .await?;
    let updated = repo
        .update_status(payment.id, PaymentStatus::Refunded, None)
        .await?;

    assert_eq!(updated.status, "refunded");
    assert_eq!(updated.stripe_payment_intent.as_deref(), Some("pi_456"));

    Ok(())
}
