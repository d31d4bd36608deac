//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use slotmap::new_key_type;
use thiserror::Error;

use crate::money::to_minor_units;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors validating a base price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Base prices cannot be negative.
    #[error("base price {0} is negative")]
    Negative(Decimal),

    /// The price does not fit in `i64` minor units.
    #[error("base price {0} is too large")]
    TooLarge(Decimal),
}

/// Check that `price` is usable as a base price.
///
/// # Errors
///
/// Returns [`PriceError::Negative`] below zero and [`PriceError::TooLarge`]
/// when the price does not fit `i64` minor units.
pub fn check_base_price(price: Decimal) -> Result<Decimal, PriceError> {
    if price < Decimal::ZERO {
        return Err(PriceError::Negative(price));
    }

    to_minor_units(price).map_err(|_err| PriceError::TooLarge(price))?;

    Ok(price)
}

/// How a product is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum BillingType {
    /// Billed every month; savings are shown per month.
    #[default]
    Monthly,

    /// Billed once.
    #[serde(rename = "One-time", alias = "OneTime")]
    OneTime,
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingType::Monthly => f.write_str("Monthly"),
            BillingType::OneTime => f.write_str("One-time"),
        }
    }
}

/// A sellable catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Stable product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Tier label, e.g. "Starter" or "Enterprise"
    pub tier: String,

    /// Description lines
    pub description: Vec<String>,

    /// Billing type
    pub billing_type: BillingType,

    /// Base price, never negative
    pub base_price: Decimal,

    /// Base commission rate as a fraction
    pub base_commission_rate: Decimal,
}

impl Product {
    /// Creates a product with no tier or description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        billing_type: BillingType,
        base_price: Decimal,
        base_commission_rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier: String::new(),
            description: Vec::new(),
            billing_type,
            base_price,
            base_commission_rate,
        }
    }
}
