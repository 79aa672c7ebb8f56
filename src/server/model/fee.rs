//! Fee configuration and fee quote domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    model::fee::{
        ArticleFeeDto, CountryDiscountDto, DiscountKind, FeeConfigDto, FeeQuoteDto,
        FeeQuoteQuery, UpdateFeeConfigDto,
    },
    server::error::{internal::InternalError, AppError},
};

/// Fee table stored as the JSON document of the active fee configuration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub default_base_fee: Decimal,
    pub currency: String,
    /// Ordered; the first matching article type wins.
    pub article_fees: Vec<ArticleFee>,
    pub country_discounts: Vec<CountryDiscount>,
    pub waiver_countries: Vec<String>,
    #[serde(default)]
    pub institution_waivers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleFee {
    pub article_type: String,
    pub fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDiscount {
    pub country: String,
    pub kind: DiscountKind,
    pub value: Decimal,
    #[serde(default)]
    pub reason: Option<String>,
}

impl FeeSchedule {
    pub fn from_dto(dto: UpdateFeeConfigDto) -> Self {
        Self {
            default_base_fee: dto.default_base_fee,
            currency: dto.currency,
            article_fees: dto
                .article_fees
                .into_iter()
                .map(|f| ArticleFee {
                    article_type: f.article_type,
                    fee: f.fee,
                })
                .collect(),
            country_discounts: dto
                .country_discounts
                .into_iter()
                .map(|d| CountryDiscount {
                    country: d.country,
                    kind: d.kind,
                    value: d.value,
                    reason: d.reason,
                })
                .collect(),
            waiver_countries: dto.waiver_countries,
            institution_waivers: dto.institution_waivers,
        }
    }
}

/// The active fee configuration with its audit fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeConfig {
    pub schedule: FeeSchedule,
    pub updated_by: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl FeeConfig {
    /// Decodes the stored JSON document.
    ///
    /// # Returns
    /// - `Ok(FeeConfig)` - The decoded configuration
    /// - `Err(AppError::InternalErr(MalformedDocument))` - The document does not match
    ///   the fee schedule shape
    pub fn from_entity(entity: entity::fee_config::Model) -> Result<Self, AppError> {
        let schedule = serde_json::from_value(entity.document).map_err(|source| {
            InternalError::MalformedDocument {
                document: "fee_config",
                source,
            }
        })?;

        Ok(Self {
            schedule,
            updated_by: entity.updated_by,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> FeeConfigDto {
        let schedule = self.schedule;

        FeeConfigDto {
            default_base_fee: schedule.default_base_fee,
            currency: schedule.currency,
            article_fees: schedule
                .article_fees
                .into_iter()
                .map(|f| ArticleFeeDto {
                    article_type: f.article_type,
                    fee: f.fee,
                })
                .collect(),
            country_discounts: schedule
                .country_discounts
                .into_iter()
                .map(|d| CountryDiscountDto {
                    country: d.country,
                    kind: d.kind,
                    value: d.value,
                    reason: d.reason,
                })
                .collect(),
            waiver_countries: schedule.waiver_countries,
            institution_waivers: schedule.institution_waivers,
            updated_by: self.updated_by,
            updated_at: self.updated_at,
        }
    }
}

/// Inputs to a fee quote.
#[derive(Debug, Clone)]
pub struct FeeQuoteParams {
    pub article_type: String,
    pub country: String,
    pub institution: String,
}

impl FeeQuoteParams {
    pub fn from_dto(query: FeeQuoteQuery) -> Self {
        Self {
            article_type: query.article_type,
            country: query.country,
            institution: query.institution,
        }
    }
}

/// Result of applying the fee schedule to a submission.
///
/// `discount_amount` always equals `base_fee - final_fee`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeQuote {
    pub base_fee: Decimal,
    pub final_fee: Decimal,
    pub discount_amount: Decimal,
    pub discount_reason: Option<String>,
    pub is_waiver: bool,
    pub currency: String,
}

impl FeeQuote {
    pub fn into_dto(self) -> FeeQuoteDto {
        FeeQuoteDto {
            base_fee: self.base_fee,
            final_fee: self.final_fee,
            discount_amount: self.discount_amount,
            discount_reason: self.discount_reason,
            is_waiver: self.is_waiver,
            currency: self.currency,
        }
    }
}
