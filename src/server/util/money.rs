//! Conversion between decimal amounts and stored minor currency units.
//!
//! Amounts are held in hundredths, so only currencies whose minor unit is a
//! hundredth can be configured.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::server::error::internal::InternalError;

/// ISO 4217 codes with zero or three decimal places in Stripe's currency list.
const NON_CENT_CURRENCIES: &[&str] = &[
    "BHD", "BIF", "CLP", "DJF", "GNF", "JOD", "JPY", "KMF", "KRW", "KWD", "MGA", "OMR", "PYG",
    "RWF", "TND", "UGX", "VND", "VUV", "XAF", "XOF", "XPF",
];

/// Whether `currency` is a three-letter code whose minor unit is a hundredth.
pub fn has_cent_minor_unit(currency: &str) -> bool {
    currency.len() == 3
        && currency.chars().all(|c| c.is_ascii_alphabetic())
        && !NON_CENT_CURRENCIES
            .iter()
            .any(|code| code.eq_ignore_ascii_case(currency))
}

/// Rounds an amount to cents, half away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a decimal amount into integer cents for storage.
///
/// # Returns
/// - `Ok(i64)` - Amount in cents after rounding to 2 decimal places
/// - `Err(InternalError::AmountOutOfRange)` - Amount does not fit in an `i64`
pub fn to_cents(amount: Decimal) -> Result<i64, InternalError> {
    let mut rounded = round_to_cents(amount);
    rounded.rescale(2);

    i64::try_from(rounded.mantissa())
        .map_err(|_| InternalError::AmountOutOfRange(amount.to_string()))
}

/// Converts stored integer cents back into a decimal amount with 2 decimal places.
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
