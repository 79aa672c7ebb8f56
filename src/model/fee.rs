use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// How a country discount reduces the base fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the base fee.
    Percentage,
    /// `value` is subtracted from the base fee.
    Flat,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeeQuoteQuery {
    pub article_type: String,
    pub country: String,
    #[serde(default)]
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeQuoteDto {
    #[schema(value_type = String)]
    pub base_fee: Decimal,
    #[schema(value_type = String)]
    pub final_fee: Decimal,
    #[schema(value_type = String)]
    pub discount_amount: Decimal,
    pub discount_reason: Option<String>,
    pub is_waiver: bool,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleFeeDto {
    pub article_type: String,
    #[schema(value_type = String)]
    pub fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountryDiscountDto {
    pub country: String,
    pub kind: DiscountKind,
    #[schema(value_type = String)]
    pub value: Decimal,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeConfigDto {
    #[schema(value_type = String)]
    pub default_base_fee: Decimal,
    pub currency: String,
    pub article_fees: Vec<ArticleFeeDto>,
    pub country_discounts: Vec<CountryDiscountDto>,
    pub waiver_countries: Vec<String>,
    pub institution_waivers: Vec<String>,
    pub updated_by: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateFeeConfigDto {
    #[schema(value_type = String)]
    pub default_base_fee: Decimal,
    pub currency: String,
    pub article_fees: Vec<ArticleFeeDto>,
    pub country_discounts: Vec<CountryDiscountDto>,
    pub waiver_countries: Vec<String>,
    #[serde(default)]
    pub institution_waivers: Vec<String>,
}
