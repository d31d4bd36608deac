//! Money display
//!
//! Prices are calculated as decimals and only turned into `Money` for output.
//! Supported currencies all have two minor-unit digits.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Errors converting a decimal amount to money.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyConversionError {
    /// The amount does not fit in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    OutOfRange(Decimal),
}

/// Round `amount` to minor units, half away from zero.
///
/// # Errors
///
/// Returns [`MoneyConversionError::OutOfRange`] if the amount overflows `i64` minor units.
pub fn to_minor_units(amount: Decimal) -> Result<i64, MoneyConversionError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(MoneyConversionError::OutOfRange(amount))
}

/// Round `amount` to minor units and wrap it in `currency`.
///
/// # Errors
///
/// Returns [`MoneyConversionError::OutOfRange`] if the amount overflows `i64` minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, MoneyConversionError> {
    Ok(Money::from_minor(to_minor_units(amount)?, currency))
}

/// Look up a supported currency by ISO code.
pub fn currency_for_code(code: &str) -> Option<&'static Currency> {
    match code {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rounds_half_away_from_zero() -> TestResult {
        assert_eq!(to_money(dec!(12.345), USD)?, Money::from_minor(1235, USD));
        assert_eq!(to_money(dec!(-12.345), USD)?, Money::from_minor(-1235, USD));
        assert_eq!(to_money(dec!(880), GBP)?, Money::from_minor(88000, GBP));

        Ok(())
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            to_money(Decimal::MAX, GBP),
            Err(MoneyConversionError::OutOfRange(Decimal::MAX))
        );
    }

    #[test]
    fn minor_units_must_fit_i64() -> TestResult {
        assert_eq!(to_minor_units(dec!(1000.005))?, 100_001);
        assert_eq!(
            to_minor_units(dec!(70000000000000000000000000000)),
            Err(MoneyConversionError::OutOfRange(dec!(70000000000000000000000000000)))
        );
        assert!(to_minor_units(dec!(100000000000000000)).is_err());

        Ok(())
    }

    #[test]
    fn currency_lookup() {
        assert_eq!(currency_for_code("EUR"), Some(EUR));
        assert_eq!(currency_for_code("ABC"), None);
    }
}
