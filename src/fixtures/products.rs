//! Product Fixtures

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    money::{currency_for_code, to_minor_units},
    products::{BillingType, Product, check_base_price},
    rates::check_rate_magnitude,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Tier label
    #[serde(default)]
    pub tier: String,

    /// Description lines
    #[serde(default)]
    pub description: Vec<String>,

    /// Billing type
    #[serde(default)]
    pub billing: BillingType,

    /// Base price (e.g., "1000.00 USD")
    pub price: String,

    /// Base commission rate (e.g., "25%" or "0.25")
    pub commission: String,
}

impl ProductFixture {
    /// Convert into a product, returning the currency of its price.
    ///
    /// # Errors
    ///
    /// Returns an error if the price or commission cannot be parsed, or the
    /// price is negative.
    pub fn try_into_product(self) -> Result<(Product, &'static Currency), FixtureError> {
        let (base_price, currency) = parse_price(&self.price)?;

        if check_base_price(base_price).is_err() {
            return Err(FixtureError::InvalidPrice(self.price));
        }

        let product = Product {
            id: self.id,
            name: self.name,
            tier: self.tier,
            description: self.description,
            billing_type: self.billing,
            base_price,
            base_commission_rate: parse_rate(&self.commission)?,
        };

        Ok((product, currency))
    }
}

/// Parse price string (e.g., "2.99 GBP") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal or does not fit `i64` minor
/// units, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    to_minor_units(amount).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency =
        currency_for_code(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok((amount, currency))
}

/// Parse rate string (e.g., "15%" or "0.15") into a fraction
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the rate is too large.
pub fn parse_rate(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    let rate = if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        value / Decimal::ONE_HUNDRED
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
    };

    Ok(check_rate_magnitude(rate)?)
}
