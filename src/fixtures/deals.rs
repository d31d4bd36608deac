//! Deal Fixtures

use serde::Deserialize;

use crate::{
    catalog::Catalog,
    deals::{Deal, DealStatus},
    fixtures::{FixtureError, products::parse_rate},
};

/// Wrapper for deals in YAML
#[derive(Debug, Deserialize)]
pub struct DealsFixture {
    /// Deals in list order
    pub deals: Vec<DealFixture>,
}

/// Deal Fixture
#[derive(Debug, Deserialize)]
pub struct DealFixture {
    /// Id of the owning prospect
    pub prospect: String,

    /// Deal name
    pub name: String,

    /// Deal status
    #[serde(default)]
    pub status: DealStatus,

    /// Line items
    #[serde(default)]
    pub items: Vec<LineItemFixture>,
}

/// Line Item Fixture
#[derive(Debug, Deserialize)]
pub struct LineItemFixture {
    /// Product id to attach
    pub product: String,

    /// Negotiated commission rate (e.g., "10%")
    #[serde(default)]
    pub negotiated_commission: Option<String>,

    /// Discount rate (e.g., "20%")
    #[serde(default)]
    pub discount: Option<String>,
}

impl DealFixture {
    /// Build the deal by attaching catalog products.
    ///
    /// # Errors
    ///
    /// Returns an error if a product is not in `catalog` or a rate cannot be parsed.
    pub fn try_into_deal(self, catalog: &Catalog) -> Result<Deal, FixtureError> {
        let mut deal = Deal::new(self.name);

        for item in self.items {
            let product = catalog
                .key_for(&item.product)
                .and_then(|key| catalog.product(key))
                .ok_or_else(|| FixtureError::ProductNotFound(item.product.clone()))?;

            let index = deal.attach(product);

            let negotiated = item
                .negotiated_commission
                .as_deref()
                .map(parse_rate)
                .transpose()?;
            let discount = item.discount.as_deref().map(parse_rate).transpose()?;

            deal.set_negotiated_commission_rate(index, negotiated)?;
            deal.set_discount_rate(index, discount)?;
        }

        deal.set_status(self.status);

        Ok(deal)
    }
}
