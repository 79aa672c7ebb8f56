use crate::server::{
    error::AppError,
    model::fee::{FeeQuoteParams, FeeSchedule},
    service::fee::FeeService,
};
use rust_decimal::Decimal;
use test_utils::{builder::TestBuilder, factory};

mod quote;

fn quote_params(article_type: &str, country: &str) -> FeeQuoteParams {
    FeeQuoteParams {
        article_type: article_type.to_string(),
        country: country.to_string(),
        institution: String::new(),
    }
}
