//! Fee configuration management and fee quotes.

pub mod calculate;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::{
    model::fee::DiscountKind,
    server::{
        data::fee_config::FeeConfigRepository,
        error::{internal::InternalError, AppError},
        model::fee::{FeeConfig, FeeQuote, FeeQuoteParams, FeeSchedule},
        util::money::has_cent_minor_unit,
    },
};

use self::calculate::calculate_fee;

pub struct FeeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the active fee configuration.
    ///
    /// # Returns
    /// - `Ok(FeeConfig)` - The stored configuration
    /// - `Err(AppError::FeeConfigMissing)` - No configuration has been saved
    pub async fn get_config(&self) -> Result<FeeConfig, AppError> {
        let repo = FeeConfigRepository::new(self.db);

        match repo.get_active().await? {
            Some(entity) => FeeConfig::from_entity(entity),
            None => Err(AppError::FeeConfigMissing),
        }
    }

    /// Replaces the active fee configuration after validating its amounts.
    ///
    /// # Returns
    /// - `Ok(FeeConfig)` - The saved configuration
    /// - `Err(AppError::BadRequest)` - Negative fees, percentages outside 0-100, or
    ///   a currency that is not counted in hundredths
    pub async fn update_config(
        &self,
        schedule: FeeSchedule,
        updated_by: i32,
    ) -> Result<FeeConfig, AppError> {
        validate_schedule(&schedule)?;

        let document =
            serde_json::to_value(&schedule).map_err(|source| InternalError::MalformedDocument {
                document: "fee_config.document",
                source,
            })?;

        let repo = FeeConfigRepository::new(self.db);
        let entity = repo.save(document, updated_by).await?;

        tracing::info!("Fee configuration updated by user {}", updated_by);

        FeeConfig::from_entity(entity)
    }

    /// Quotes the publication fee for the given submission details.
    pub async fn quote(&self, params: &FeeQuoteParams) -> Result<FeeQuote, AppError> {
        let config = self.get_config().await?;

        Ok(calculate_fee(&config.schedule, params))
    }
}

fn validate_schedule(schedule: &FeeSchedule) -> Result<(), AppError> {
    if !has_cent_minor_unit(&schedule.currency) {
        return Err(AppError::BadRequest(format!(
            "Currency {:?} must be a three-letter code with two decimal places",
            schedule.currency
        )));
    }
    if schedule.default_base_fee.is_sign_negative()
        || schedule.article_fees.iter().any(|f| f.fee.is_sign_negative())
    {
        return Err(AppError::BadRequest("Fees cannot be negative".to_string()));
    }

    for discount in &schedule.country_discounts {
        let out_of_range = match discount.kind {
            DiscountKind::Percentage => {
                discount.value.is_sign_negative() || discount.value > Decimal::ONE_HUNDRED
            }
            DiscountKind::Flat => discount.value.is_sign_negative(),
        };
        if out_of_range {
            return Err(AppError::BadRequest(format!(
                "Invalid discount value for country {}",
                discount.country
            )));
        }
    }

    Ok(())
}
