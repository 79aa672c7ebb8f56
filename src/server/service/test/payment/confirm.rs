use super::*;

/// Tests confirming a payment that is already settled.
///
/// Expected: payment returned unchanged without contacting a gateway
#[tokio::test]
async fn returns_settled_payment_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("completed")
        .build()
        .await?;
    let author = load_user(db, author.id).await?;

    let confirmed = PaymentService::new(db, None)
        .confirm(payment.id, &author)
        .await?;

    assert_eq!(confirmed.status, PaymentStatus::Completed);

    Ok(())
}

/// Tests confirming a pending payment without a gateway.
///
/// Expected: Err(AppError::PaymentGatewayDisabled)
#[tokio::test]
async fn pending_payment_needs_gateway() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .build()
        .await?;
    let author = load_user(db, author.id).await?;

    let result = PaymentService::new(db, None)
        .confirm(payment.id, &author)
        .await;

    assert!(matches!(result, Err(AppError::PaymentGatewayDisabled)));

    Ok(())
}

/// Tests that strangers cannot confirm but admins can.
///
/// Expected: Err(AuthError::AccessDenied) for another author, Ok for admin
#[tokio::test]
async fn restricts_to_payer_or_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let admin = factory::user::create_user_with_roles(db, &["admin"]).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("waived")
        .build()
        .await?;
    let other = load_user(db, other.id).await?;
    let admin = load_user(db, admin.id).await?;
    let service = PaymentService::new(db, None);

    assert!(matches!(
        service.confirm(payment.id, &other).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert!(service.confirm(payment.id, &admin).await.is_ok());

    Ok(())
}

/// Tests listing a manuscript's payments.
///
/// Expected: visible to the submitter and editors, denied to other authors
#[tokio::test]
async fn lists_payments_for_owner_and_editors() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let editor = factory::user::create_user_with_roles(db, &["editor"]).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("failed")
        .build()
        .await?;
    let author = load_user(db, author.id).await?;
    let other = load_user(db, other.id).await?;
    let editor = load_user(db, editor.id).await?;
    let service = PaymentService::new(db, None);

    assert_eq!(service.get_for_manuscript(manuscript.id, &author).await?.len(), 1);
    assert_eq!(service.get_for_manuscript(manuscript.id, &editor).await?.len(), 1);
    assert!(matches!(
        service.get_for_manuscript(manuscript.id, &other).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests confirming an expired payment whose checkout was paid after expiry.
///
/// Expected: payment completed
#[tokio::test]
async fn completes_expired_payment_with_paid_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = checkout_stub("paid").await;

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .status("expired")
        .session_id("cs_test_late")
        .build()
        .await?;
    let author = load_user(db, author.id).await?;

    let confirmed = PaymentService::new(db, Some(&gateway))
        .confirm(payment.id, &author)
        .await?;

    assert_eq!(confirmed.status, PaymentStatus::Completed);
    assert_eq!(confirmed.stripe_payment_intent.as_deref(), Some("pi_test_123"));

    Ok(())
}

/// Tests confirming a pending payment whose checkout is not paid yet.
///
/// Expected: payment still pending
#[tokio::test]
async fn leaves_unpaid_payment_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = checkout_stub("unpaid").await;

    let author = factory::create_user(db).await?;
    let manuscript = factory::create_manuscript(db, author.id).await?;
    let payment = factory::payment::PaymentFactory::new(db, manuscript.id, author.id)
        .session_id("cs_test_open")
        .build()
        .await?;
    let author = load_user(db, author.id).await?;

    let confirmed = PaymentService::new(db, Some(&gateway))
        .confirm(payment.id, &author)
        .await?;

    assert_eq!(confirmed.status, PaymentStatus::Pending);

    Ok(())
}
