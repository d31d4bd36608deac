//! Deal totals

use std::{iter::Sum, ops::Add};

use rust_decimal::Decimal;

use crate::pricing::{LineItemPricing, Priced, PricingInput, price_line_item};

/// Summed prices across a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DealTotals {
    /// Sum of base prices
    pub base_price: Decimal,

    /// Sum of commission-inclusive prices
    pub total_price: Decimal,

    /// Sum of discounted prices
    pub discounted_price: Decimal,

    /// Sum of agent commission, negative lines included
    pub agent_commission: Decimal,

    /// Sum of customer savings
    pub customer_savings: Decimal,
}

impl DealTotals {
    /// Totals for a single priced row.
    pub fn from_line(input: &PricingInput, pricing: &LineItemPricing) -> Self {
        Self {
            base_price: input.base_price,
            total_price: pricing.total_price,
            discounted_price: pricing.discounted_price,
            agent_commission: pricing.agent_commission,
            customer_savings: pricing.customer_savings,
        }
    }

    /// Aggregate agent commission as a percentage of the summed base price.
    pub fn system_rate_percent(&self) -> Decimal {
        if self.base_price > Decimal::ZERO {
            self.agent_commission / self.base_price * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    /// Returns true when the deal as a whole loses margin.
    pub fn is_negative_margin(&self) -> bool {
        self.agent_commission < Decimal::ZERO
    }
}

impl Add for DealTotals {
    type Output = DealTotals;

    fn add(self, rhs: Self) -> Self::Output {
        DealTotals {
            base_price: self.base_price + rhs.base_price,
            total_price: self.total_price + rhs.total_price,
            discounted_price: self.discounted_price + rhs.discounted_price,
            agent_commission: self.agent_commission + rhs.agent_commission,
            customer_savings: self.customer_savings + rhs.customer_savings,
        }
    }
}

impl Sum for DealTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DealTotals::default(), Add::add)
    }
}

impl<'a> Sum<&'a DealTotals> for DealTotals {
    fn sum<I: Iterator<Item = &'a DealTotals>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Price every item and sum the results.
///
/// The result does not depend on item order. An empty input yields zeros.
pub fn aggregate<I>(items: I) -> DealTotals
where
    I: IntoIterator,
    I::Item: Priced,
{
    items
        .into_iter()
        .map(|item| {
            let input = item.pricing_input();
            DealTotals::from_line(&input, &price_line_item(&input))
        })
        .sum()
}
