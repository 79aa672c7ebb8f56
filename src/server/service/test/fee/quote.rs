use super::*;

/// Tests quoting before any configuration is saved.
///
/// Expected: Err(AppError::FeeConfigMissing)
#[tokio::test]
async fn requires_configuration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::FeeConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = FeeService::new(db).quote(&quote_params("research", "DE")).await;

    assert!(matches!(result, Err(AppError::FeeConfigMissing)));

    Ok(())
}

/// Tests quotes from the stored configuration.
///
/// Expected: full fee, percentage discount and waiver per country
#[tokio::test]
async fn quotes_from_stored_configuration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::FeeConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::fee_config::create_fee_config(db, factory::fee_config::sample_document()).await?;
    let service = FeeService::new(db);

    let full = service.quote(&quote_params("research", "DE")).await?;
    let discounted = service.quote(&quote_params("research", "IN")).await?;
    let waived = service.quote(&quote_params("review", "NP")).await?;

    assert_eq!(full.final_fee, Decimal::new(150000, 2));
    assert_eq!(full.discount_amount, Decimal::ZERO);
    assert_eq!(discounted.final_fee, Decimal::new(75000, 2));
    assert!(!discounted.is_waiver);
    assert!(waived.is_waiver);
    assert_eq!(waived.final_fee, Decimal::ZERO);
    assert_eq!(waived.base_fee, Decimal::new(120000, 2));

    Ok(())
}
