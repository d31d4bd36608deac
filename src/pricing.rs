//! Line item pricing
//!
//! Commission is a markup on top of the base price; the discount is then taken
//! off the commission-inclusive total. The agent keeps whatever remains above
//! the base price, which can be negative once a large discount is applied.

use rust_decimal::Decimal;

use crate::rates::RateOverrides;

/// Inputs for pricing a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingInput {
    /// Base price, never negative
    pub base_price: Decimal,

    /// Commission rate used when no negotiated rate is present
    pub base_commission_rate: Decimal,

    /// Per-row negotiated commission rate
    pub negotiated_commission_rate: Option<Decimal>,

    /// Per-row discount rate
    pub discount_rate: Option<Decimal>,
}

impl PricingInput {
    /// Input with no overrides.
    pub fn new(base_price: Decimal, base_commission_rate: Decimal) -> Self {
        Self {
            base_price,
            base_commission_rate,
            negotiated_commission_rate: None,
            discount_rate: None,
        }
    }

    /// Replace both overrides.
    #[must_use]
    pub fn with_overrides(self, overrides: RateOverrides) -> Self {
        Self {
            negotiated_commission_rate: overrides.negotiated_commission_rate,
            discount_rate: overrides.discount_rate,
            ..self
        }
    }

    /// Set the negotiated commission rate.
    #[must_use]
    pub fn with_negotiated_commission_rate(self, rate: Decimal) -> Self {
        Self {
            negotiated_commission_rate: Some(rate),
            ..self
        }
    }

    /// Set the discount rate.
    #[must_use]
    pub fn with_discount_rate(self, rate: Decimal) -> Self {
        Self {
            discount_rate: Some(rate),
            ..self
        }
    }

    /// The overrides carried by this input.
    pub fn overrides(&self) -> RateOverrides {
        RateOverrides {
            negotiated_commission_rate: self.negotiated_commission_rate,
            discount_rate: self.discount_rate,
        }
    }
}

/// Derived prices for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemPricing {
    /// Base price plus commission
    pub total_price: Decimal,

    /// Total price after discount
    pub discounted_price: Decimal,

    /// What the agent earns after the discount; may be negative
    pub agent_commission: Decimal,

    /// Amount taken off the total price
    pub customer_savings: Decimal,

    /// Agent commission as a percentage of the base price
    pub system_rate_percent: Decimal,
}

impl LineItemPricing {
    /// Returns true when the discount has eaten past the commission.
    pub fn is_negative_margin(&self) -> bool {
        self.agent_commission < Decimal::ZERO
    }
}

/// Anything that can be priced as a line item.
pub trait Priced {
    /// The inputs the pricer needs for this row.
    fn pricing_input(&self) -> PricingInput;

    /// Price this row.
    fn pricing(&self) -> LineItemPricing {
        price_line_item(&self.pricing_input())
    }
}

impl Priced for PricingInput {
    fn pricing_input(&self) -> PricingInput {
        *self
    }
}

impl<T: Priced + ?Sized> Priced for &T {
    fn pricing_input(&self) -> PricingInput {
        (**self).pricing_input()
    }
}

/// Price one line item.
///
/// Nothing is clamped, and a zero base price yields a zero system rate. Prices
/// accepted by [`check_base_price`] and rates within [`MAX_RATE_MAGNITUDE`]
/// always stay inside `Decimal` range.
///
/// [`check_base_price`]: crate::products::check_base_price
/// [`MAX_RATE_MAGNITUDE`]: crate::rates::MAX_RATE_MAGNITUDE
pub fn price_line_item(input: &PricingInput) -> LineItemPricing {
    let overrides = input.overrides();

    let rate = overrides.effective_commission_rate(input.base_commission_rate);
    let total_price = input.base_price * (Decimal::ONE + rate);

    let discount = overrides.effective_discount_rate();
    let discounted_price = total_price * (Decimal::ONE - discount);

    let agent_commission = discounted_price - input.base_price;
    let customer_savings = total_price - discounted_price;

    let system_rate_percent = if input.base_price > Decimal::ZERO {
        agent_commission / input.base_price * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    LineItemPricing {
        total_price,
        discounted_price,
        agent_commission,
        customer_savings,
        system_rate_percent,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const PRICES: [Decimal; 4] = [dec!(0), dec!(0.01), dec!(99.99), dec!(1000)];
    const RATES: [Decimal; 5] = [dec!(0), dec!(0.1), dec!(0.25), dec!(0.5), dec!(1)];

    #[test]
    fn base_commission_only() {
        let pricing = price_line_item(&PricingInput::new(dec!(1000), dec!(0.25)));

        assert_eq!(
            pricing,
            LineItemPricing {
                total_price: dec!(1250),
                discounted_price: dec!(1250),
                agent_commission: dec!(250),
                customer_savings: dec!(0),
                system_rate_percent: dec!(25),
            }
        );
        assert!(!pricing.is_negative_margin());
    }

    #[test]
    fn negotiated_rate_and_discount_can_go_negative() {
        let input = PricingInput::new(dec!(1000), dec!(0.25))
            .with_negotiated_commission_rate(dec!(0.10))
            .with_discount_rate(dec!(0.20));

        let pricing = price_line_item(&input);

        assert_eq!(pricing.total_price, dec!(1100));
        assert_eq!(pricing.discounted_price, dec!(880));
        assert_eq!(pricing.agent_commission, dec!(-120));
        assert_eq!(pricing.customer_savings, dec!(220));
        assert_eq!(pricing.system_rate_percent, dec!(-12));
        assert!(pricing.is_negative_margin());
    }

    #[test]
    fn zero_base_price_has_zero_system_rate() {
        for rate in RATES {
            for discount in [dec!(-0.5), dec!(0), dec!(0.3), dec!(2)] {
                let input = PricingInput::new(Decimal::ZERO, rate).with_discount_rate(discount);

                assert_eq!(price_line_item(&input).system_rate_percent, Decimal::ZERO);
            }
        }
    }

    #[test]
    fn absent_overrides_match_explicit_defaults() {
        for price in PRICES {
            for rate in RATES {
                let implicit = PricingInput::new(price, rate);
                let explicit = implicit
                    .with_negotiated_commission_rate(rate)
                    .with_discount_rate(Decimal::ZERO);

                assert_eq!(price_line_item(&implicit), price_line_item(&explicit));
            }
        }
    }

    #[test]
    fn explicit_zero_negotiated_rate_is_not_the_base_rate() {
        let input = PricingInput::new(dec!(200), dec!(0.25)).with_negotiated_commission_rate(dec!(0));

        assert_eq!(price_line_item(&input).total_price, dec!(200));
    }

    #[test]
    fn prices_are_ordered_for_non_negative_rates() {
        for price in PRICES {
            for rate in RATES {
                for discount in RATES {
                    let input = PricingInput::new(price, rate).with_discount_rate(discount);
                    let pricing = price_line_item(&input);

                    assert!(pricing.discounted_price <= pricing.total_price);
                    assert!(pricing.total_price >= price);
                    assert_eq!(
                        pricing.customer_savings + pricing.discounted_price,
                        pricing.total_price
                    );
                }
            }
        }
    }

    #[test]
    fn negative_discount_yields_negative_savings() {
        let input = PricingInput::new(dec!(100), dec!(0.25)).with_discount_rate(dec!(-0.1));

        let pricing = price_line_item(&input);

        assert_eq!(pricing.discounted_price, dec!(137.5));
        assert_eq!(pricing.customer_savings, dec!(-12.5));
    }

    #[test]
    fn largest_accepted_inputs_price_without_overflow() {
        use crate::{products::check_base_price, rates::MAX_RATE_MAGNITUDE};

        let price = dec!(92233720368547758.07);

        assert_eq!(check_base_price(price), Ok(price));

        for rate in [-MAX_RATE_MAGNITUDE, MAX_RATE_MAGNITUDE] {
            for discount in [-MAX_RATE_MAGNITUDE, MAX_RATE_MAGNITUDE] {
                let input = PricingInput::new(price, rate).with_discount_rate(discount);
                let pricing = price_line_item(&input);

                assert_eq!(
                    pricing.customer_savings + pricing.discounted_price,
                    pricing.total_price
                );
            }
        }
    }

    #[test]
    fn overrides_round_trip_through_input() {
        let overrides = RateOverrides::new(dec!(0.1), dec!(0.05));
        let input = PricingInput::new(dec!(10), dec!(0.2)).with_overrides(overrides);

        assert_eq!(input.overrides(), overrides);
        assert_eq!(input.pricing(), price_line_item(&input));
    }
}
