//! Rates
//!
//! Commission and discount rates are carried as fractions (`0.25` is 25%).
//! People type them as percent points, so this module also owns the input
//! boundary that turns text like `"12.5"` or `"12.5%"` into a fraction.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Errors produced while turning user input into a rate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateInputError {
    /// The input could not be parsed as a number.
    #[error("rate input is not a number: {0:?}")]
    NotANumber(String),

    /// The rate falls outside `[0, 1]` and the strict policy is active.
    #[error("rate {0} is outside the range 0% to 100%")]
    OutOfRange(Decimal),

    /// The rate's magnitude exceeds [`MAX_RATE_MAGNITUDE`] under any policy.
    #[error("rate {0} is too large")]
    TooLarge(Decimal),
}

/// Largest rate magnitude accepted at any input boundary (100000%).
///
/// Together with prices that fit `i64` minor units this keeps every product in
/// the pricer, and sums over large deals, inside `Decimal` range.
pub const MAX_RATE_MAGNITUDE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// How rate inputs outside `[0, 1]` are treated at the input boundary.
///
/// Neither policy clamps: a value is either accepted as typed or rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RatePolicy {
    /// Accept any number, including negative discounts and rates above 100%.
    #[default]
    Permissive,

    /// Reject rates below 0% or above 100%.
    Strict,
}

impl RatePolicy {
    /// Check a fractional rate against this policy.
    ///
    /// # Errors
    ///
    /// Returns [`RateInputError::OutOfRange`] when the policy is strict and the
    /// rate is outside `[0, 1]`.
    pub fn check(self, rate: Decimal) -> Result<Decimal, RateInputError> {
        match self {
            RatePolicy::Permissive => Ok(rate),
            RatePolicy::Strict if (Decimal::ZERO..=Decimal::ONE).contains(&rate) => Ok(rate),
            RatePolicy::Strict => Err(RateInputError::OutOfRange(rate)),
        }
    }
}

/// Optional per-row overrides for commission and discount.
///
/// `None` means "not set", which is distinct from an explicit zero rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateOverrides {
    /// Replaces the base commission rate when present.
    pub negotiated_commission_rate: Option<Decimal>,

    /// Applied to the commission-inclusive price; treated as zero when absent.
    pub discount_rate: Option<Decimal>,
}

impl RateOverrides {
    /// Overrides with both rates set.
    pub fn new(negotiated_commission_rate: Decimal, discount_rate: Decimal) -> Self {
        Self {
            negotiated_commission_rate: Some(negotiated_commission_rate),
            discount_rate: Some(discount_rate),
        }
    }

    /// The negotiated rate if present, otherwise `base_commission_rate`.
    pub fn effective_commission_rate(&self, base_commission_rate: Decimal) -> Decimal {
        self.negotiated_commission_rate
            .unwrap_or(base_commission_rate)
    }

    /// The discount rate if present, otherwise zero.
    pub fn effective_discount_rate(&self) -> Decimal {
        self.discount_rate.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if neither override is set.
    pub fn is_empty(&self) -> bool {
        self.negotiated_commission_rate.is_none() && self.discount_rate.is_none()
    }
}

/// The override a rate edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateField {
    /// [`RateOverrides::negotiated_commission_rate`]
    NegotiatedCommission,

    /// [`RateOverrides::discount_rate`]
    Discount,
}

impl RateField {
    /// Parse percent-point `input` and store it in the targeted override.
    ///
    /// Blank input clears the override. On error `overrides` is left exactly
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`RateInputError`] if the input is not a number or is rejected
    /// by `policy`.
    pub fn apply(
        self,
        overrides: &mut RateOverrides,
        input: &str,
        policy: RatePolicy,
    ) -> Result<(), RateInputError> {
        let value = parse_rate_override(input, policy).inspect_err(|err| {
            debug!(field = ?self, input, %err, "rejected rate input");
        })?;

        match self {
            RateField::NegotiatedCommission => overrides.negotiated_commission_rate = value,
            RateField::Discount => overrides.discount_rate = value,
        }

        Ok(())
    }
}

/// Parse percent points (`"12.5"` or `"12.5%"`) into a fraction (`0.125`).
///
/// # Errors
///
/// Returns [`RateInputError::NotANumber`] if the input is not a decimal number,
/// or [`RateInputError::TooLarge`] past [`MAX_RATE_MAGNITUDE`].
pub fn parse_percent_points(input: &str) -> Result<Decimal, RateInputError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    let points = digits
        .parse::<Decimal>()
        .map_err(|_err| RateInputError::NotANumber(input.to_string()))?;

    check_rate_magnitude(from_percent_points(points))
}

/// Reject fractional rates whose magnitude exceeds [`MAX_RATE_MAGNITUDE`].
///
/// # Errors
///
/// Returns [`RateInputError::TooLarge`] for such rates.
pub fn check_rate_magnitude(rate: Decimal) -> Result<Decimal, RateInputError> {
    if rate.abs() > MAX_RATE_MAGNITUDE {
        return Err(RateInputError::TooLarge(rate));
    }

    Ok(rate)
}

/// Parse an optional override from percent points, applying `policy`.
///
/// Blank input yields `Ok(None)`.
///
/// # Errors
///
/// Returns a [`RateInputError`] if the input is not a number or is rejected
/// by `policy`.
pub fn parse_rate_override(
    input: &str,
    policy: RatePolicy,
) -> Result<Option<Decimal>, RateInputError> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let rate = parse_percent_points(input)?;

    policy.check(rate).map(Some)
}

/// Convert a fraction to percent points for display (`0.25` -> `25`).
pub fn to_percent_points(rate: Decimal) -> Decimal {
    rate * Decimal::ONE_HUNDRED
}

/// Convert percent points to a fraction (`25` -> `0.25`).
pub fn from_percent_points(points: Decimal) -> Decimal {
    points / Decimal::ONE_HUNDRED
}
