//! Pure fee calculation over a fee schedule.
//!
//! Resolution order, first match wins:
//! 1. country in the waiver list: fee waived
//! 2. institution in the institution waiver list: fee waived
//! 3. country with a discount record: percentage or flat discount, floored at zero
//! 4. no discount
//!
//! The calculation never fails. Unknown article types fall back to the default
//! base fee and unknown countries receive no discount.

use rust_decimal::Decimal;

use crate::{
    model::fee::DiscountKind,
    server::{
        model::fee::{FeeQuote, FeeQuoteParams, FeeSchedule},
        util::money::round_to_cents,
    },
};

/// Applies the fee schedule to an article type, country and institution.
pub fn calculate_fee(schedule: &FeeSchedule, params: &FeeQuoteParams) -> FeeQuote {
    let article_type = params.article_type.trim();
    let country = params.country.trim();
    let institution = params.institution.trim();

    let base_fee = round_to_cents(
        schedule
            .article_fees
            .iter()
            .find(|f| f.article_type.trim() == article_type)
            .map(|f| f.fee)
            .unwrap_or(schedule.default_base_fee),
    );

    if schedule
        .waiver_countries
        .iter()
        .any(|c| c.trim().eq_ignore_ascii_case(country))
    {
        return waiver(
            schedule,
            base_fee,
            format!("Publication fee waived for authors from {}", country),
        );
    }

    if !institution.is_empty()
        && schedule
            .institution_waivers
            .iter()
            .any(|i| i.trim().to_lowercase() == institution.to_lowercase())
    {
        return waiver(
            schedule,
            base_fee,
            format!("Publication fee waived for {}", institution),
        );
    }

    let discount = schedule
        .country_discounts
        .iter()
        .find(|d| d.country.trim().eq_ignore_ascii_case(country));

    let Some(discount) = discount else {
        return FeeQuote {
            base_fee,
            final_fee: base_fee,
            discount_amount: Decimal::ZERO,
            discount_reason: None,
            is_waiver: false,
            currency: schedule.currency.clone(),
        };
    };

    let discounted = match discount.kind {
        DiscountKind::Percentage => {
            base_fee * (Decimal::ONE_HUNDRED - discount.value) / Decimal::ONE_HUNDRED
        }
        DiscountKind::Flat => base_fee - discount.value,
    };
    let final_fee = round_to_cents(discounted.max(Decimal::ZERO)).min(base_fee);

    let reason = discount.reason.clone().unwrap_or_else(|| match discount.kind {
        DiscountKind::Percentage => {
            format!("{}% discount for authors from {}", discount.value.normalize(), country)
        }
        DiscountKind::Flat => format!(
            "{} {} discount for authors from {}",
            discount.value.normalize(),
            schedule.currency,
            country
        ),
    });

    FeeQuote {
        base_fee,
        final_fee,
        discount_amount: base_fee - final_fee,
        discount_reason: Some(reason),
        is_waiver: false,
        currency: schedule.currency.clone(),
    }
}

fn waiver(schedule: &FeeSchedule, base_fee: Decimal, reason: String) -> FeeQuote {
    FeeQuote {
        base_fee,
        final_fee: Decimal::ZERO,
        discount_amount: base_fee,
        discount_reason: Some(reason),
        is_waiver: true,
        currency: schedule.currency.clone(),
    }
}
