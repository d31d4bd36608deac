//! Deals
//!
//! A deal owns value copies of the products attached to it. Later catalog
//! edits never reach an existing line item.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::trace;

use crate::{
    pricing::{Priced, PricingInput},
    products::{BillingType, Product},
    rates::{RateField, RateInputError, RateOverrides, RatePolicy},
    totals::{DealTotals, aggregate},
};

pub mod summary;

/// Errors raised while editing a deal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    /// No line item at this position.
    #[error("line item {index} does not exist; deal has {len} line items")]
    LineItemOutOfRange {
        /// Requested position
        index: usize,
        /// Number of line items in the deal
        len: usize,
    },

    /// Rejected rate input for a line item.
    #[error(transparent)]
    RateInput(#[from] RateInputError),
}

/// Where a deal stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
pub enum DealStatus {
    /// Proposal sent
    #[default]
    Proposal,

    /// Terms under discussion
    Negotiating,

    /// Closed and won
    Won,

    /// Closed and lost
    Lost,
}

impl DealStatus {
    /// Returns true while the deal can still change outcome.
    pub fn is_open(self) -> bool {
        matches!(self, DealStatus::Proposal | DealStatus::Negotiating)
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            DealStatus::Proposal => "Proposal",
            DealStatus::Negotiating => "Negotiating",
            DealStatus::Won => "Won",
            DealStatus::Lost => "Lost",
        }
    }
}

/// A product as it was when attached to a deal, plus per-deal overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealLineItem {
    product_id: String,
    name: String,
    base_price: Decimal,
    billing_type: BillingType,
    base_commission_rate: Decimal,
    overrides: RateOverrides,
}

impl DealLineItem {
    /// Snapshot `product` with no overrides.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            base_price: product.base_price,
            billing_type: product.billing_type,
            base_commission_rate: product.base_commission_rate,
            overrides: RateOverrides::default(),
        }
    }

    /// Id of the product this line was copied from.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Product name at attach time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base price at attach time.
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    /// Billing type at attach time.
    pub fn billing_type(&self) -> BillingType {
        self.billing_type
    }

    /// Base commission rate at attach time.
    pub fn base_commission_rate(&self) -> Decimal {
        self.base_commission_rate
    }

    /// Per-deal overrides.
    pub fn overrides(&self) -> &RateOverrides {
        &self.overrides
    }
}

impl Priced for DealLineItem {
    fn pricing_input(&self) -> PricingInput {
        PricingInput::new(self.base_price, self.base_commission_rate).with_overrides(self.overrides)
    }
}

/// A named set of line items sold to one prospect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    name: String,
    status: DealStatus,
    line_items: Vec<DealLineItem>,
}

impl Deal {
    /// Creates an empty deal in [`DealStatus::Proposal`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DealStatus::default(),
            line_items: Vec::new(),
        }
    }

    /// Copy `product` into the deal, returning the new line item's position.
    pub fn attach(&mut self, product: &Product) -> usize {
        trace!(deal = %self.name, product = %product.id, "attaching product");

        self.line_items.push(DealLineItem::from_product(product));
        self.line_items.len() - 1
    }

    /// Set or clear the negotiated commission rate of one line item.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::LineItemOutOfRange`] for an unknown position.
    pub fn set_negotiated_commission_rate(
        &mut self,
        index: usize,
        rate: Option<Decimal>,
    ) -> Result<(), DealError> {
        self.overrides_mut(index)?.negotiated_commission_rate = rate;

        Ok(())
    }

    /// Set or clear the discount rate of one line item.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::LineItemOutOfRange`] for an unknown position.
    pub fn set_discount_rate(
        &mut self,
        index: usize,
        rate: Option<Decimal>,
    ) -> Result<(), DealError> {
        self.overrides_mut(index)?.discount_rate = rate;

        Ok(())
    }

    /// Apply percent-point text to one override of a line item.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::LineItemOutOfRange`] for an unknown position, or
    /// [`DealError::RateInput`] if the input is rejected; the line item is
    /// then unchanged.
    pub fn apply_rate_input(
        &mut self,
        index: usize,
        field: RateField,
        input: &str,
        policy: RatePolicy,
    ) -> Result<(), DealError> {
        field.apply(self.overrides_mut(index)?, input, policy)?;

        Ok(())
    }

    /// Remove a line item, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::LineItemOutOfRange`] for an unknown position.
    pub fn remove_line_item(&mut self, index: usize) -> Result<DealLineItem, DealError> {
        if index >= self.line_items.len() {
            return Err(self.out_of_range(index));
        }

        Ok(self.line_items.remove(index))
    }

    /// Deal name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current status
    pub fn status(&self) -> DealStatus {
        self.status
    }

    /// Move the deal to `status`.
    pub fn set_status(&mut self, status: DealStatus) {
        trace!(deal = %self.name, from = ?self.status, to = ?status, "deal status changed");

        self.status = status;
    }

    /// Line items in attach order.
    pub fn line_items(&self) -> &[DealLineItem] {
        &self.line_items
    }

    /// Line item at `index`.
    pub fn line_item(&self, index: usize) -> Option<&DealLineItem> {
        self.line_items.get(index)
    }

    /// Totals derived from the current line items.
    pub fn totals(&self) -> DealTotals {
        aggregate(&self.line_items)
    }

    fn overrides_mut(&mut self, index: usize) -> Result<&mut RateOverrides, DealError> {
        let len = self.line_items.len();

        self.line_items
            .get_mut(index)
            .map(|item| &mut item.overrides)
            .ok_or(DealError::LineItemOutOfRange { index, len })
    }

    fn out_of_range(&self, index: usize) -> DealError {
        DealError::LineItemOutOfRange {
            index,
            len: self.line_items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn starter() -> Product {
        Product::new("starter", "Starter", BillingType::Monthly, dec!(1000), dec!(0.25))
    }

    fn growth() -> Product {
        Product::new("growth", "Growth", BillingType::OneTime, dec!(500), dec!(0.30))
    }

    #[test]
    fn attach_copies_the_product() {
        let mut product = starter();
        let mut deal = Deal::new("Acme rollout");

        let index = deal.attach(&product);

        product.base_price = dec!(5000);
        product.name = "Renamed".to_string();

        let item = deal.line_item(index);

        assert_eq!(item.map(DealLineItem::base_price), Some(dec!(1000)));
        assert_eq!(item.map(DealLineItem::name), Some("Starter"));
    }

    #[test]
    fn totals_follow_edits() -> TestResult {
        let mut deal = Deal::new("Acme rollout");
        let first = deal.attach(&starter());
        deal.attach(&growth());

        assert_eq!(deal.totals().total_price, dec!(1900));
        assert_eq!(deal.totals().agent_commission, dec!(400));

        deal.set_negotiated_commission_rate(first, Some(dec!(0.10)))?;
        deal.set_discount_rate(first, Some(dec!(0.20)))?;

        assert_eq!(deal.totals().total_price, dec!(1750));
        assert_eq!(deal.totals().agent_commission, dec!(30));

        deal.remove_line_item(first)?;

        assert_eq!(deal.totals().total_price, dec!(650));
        assert_eq!(deal.line_items().len(), 1);

        Ok(())
    }

    #[test]
    fn edits_out_of_range_error() {
        let mut deal = Deal::new("Empty");

        assert_eq!(
            deal.set_discount_rate(0, Some(dec!(0.1))),
            Err(DealError::LineItemOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(
            deal.remove_line_item(3),
            Err(DealError::LineItemOutOfRange { index: 3, len: 0 })
        );
    }

    #[test]
    fn rejected_rate_input_keeps_state() -> TestResult {
        let mut deal = Deal::new("Acme rollout");
        let index = deal.attach(&starter());

        deal.apply_rate_input(index, RateField::NegotiatedCommission, "10", RatePolicy::Permissive)?;

        let result =
            deal.apply_rate_input(index, RateField::NegotiatedCommission, "ten", RatePolicy::Permissive);

        assert!(matches!(result, Err(DealError::RateInput(_))));
        assert_eq!(
            deal.line_item(index)
                .and_then(|item| item.overrides().negotiated_commission_rate),
            Some(dec!(0.1))
        );

        Ok(())
    }

    #[test]
    fn status_transitions() {
        let mut deal = Deal::new("Acme rollout");

        assert_eq!(deal.status(), DealStatus::Proposal);
        assert!(deal.status().is_open());

        deal.set_status(DealStatus::Won);

        assert!(!deal.status().is_open());
        assert_eq!(deal.status().label(), "Won");
    }
}
