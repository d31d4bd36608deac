//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{Priced, PricingInput},
    products::{Product, ProductKey},
    rates::{RateField, RateInputError, RateOverrides, RatePolicy},
    totals::{DealTotals, aggregate},
};

/// Errors raised by catalog edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Another product already uses this identifier.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    /// The key does not refer to a product in this catalog.
    #[error("missing product")]
    MissingProduct(ProductKey),

    /// Rejected rate input for a catalog row.
    #[error(transparent)]
    RateInput(#[from] RateInputError),
}

/// A catalog row: a product and the overrides applied directly to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    product: Product,
    overrides: RateOverrides,
}

impl CatalogEntry {
    /// Creates a row with no overrides.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            overrides: RateOverrides::default(),
        }
    }

    /// The product on this row.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Overrides applied to this row.
    pub fn overrides(&self) -> &RateOverrides {
        &self.overrides
    }
}

impl Priced for CatalogEntry {
    fn pricing_input(&self) -> PricingInput {
        PricingInput::new(self.product.base_price, self.product.base_commission_rate)
            .with_overrides(self.overrides)
    }
}

/// Products offered in a single currency.
#[derive(Debug)]
pub struct Catalog {
    entries: SlotMap<ProductKey, CatalogEntry>,
    ids: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Creates an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            entries: SlotMap::with_key(),
            ids: FxHashMap::default(),
            currency,
        }
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if the id is already taken.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        if self.ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        let id = product.id.clone();
        let key = self.entries.insert(CatalogEntry::new(product));

        self.ids.insert(id, key);

        Ok(key)
    }

    /// Edit a product in place.
    ///
    /// Deals hold their own snapshot of each product, so edits only affect
    /// products attached afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingProduct`] for an unknown key, or
    /// [`CatalogError::DuplicateProduct`] if the edit renames the product to
    /// an id already in use (the edit is then discarded).
    pub fn update(
        &mut self,
        key: ProductKey,
        edit: impl FnOnce(&mut Product),
    ) -> Result<(), CatalogError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or(CatalogError::MissingProduct(key))?;

        let mut product = entry.product.clone();
        edit(&mut product);

        if product.id != entry.product.id {
            if self.ids.contains_key(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }

            self.ids.remove(&entry.product.id);
            self.ids.insert(product.id.clone(), key);
        }

        debug!(product = %product.id, "updated catalog product");
        entry.product = product;

        Ok(())
    }

    /// Remove a product, returning it.
    pub fn remove(&mut self, key: ProductKey) -> Option<Product> {
        let entry = self.entries.remove(key)?;

        self.ids.remove(&entry.product.id);

        Some(entry.product)
    }

    /// Replace the overrides on a catalog row.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingProduct`] for an unknown key.
    pub fn set_overrides(
        &mut self,
        key: ProductKey,
        overrides: RateOverrides,
    ) -> Result<(), CatalogError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or(CatalogError::MissingProduct(key))?;

        entry.overrides = overrides;

        Ok(())
    }

    /// Apply percent-point text to one override of a catalog row.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingProduct`] for an unknown key, or
    /// [`CatalogError::RateInput`] if the input is rejected; the row is then
    /// unchanged.
    pub fn apply_rate_input(
        &mut self,
        key: ProductKey,
        field: RateField,
        input: &str,
        policy: RatePolicy,
    ) -> Result<(), CatalogError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or(CatalogError::MissingProduct(key))?;

        field.apply(&mut entry.overrides, input, policy)?;

        Ok(())
    }

    /// Look up a row.
    pub fn get(&self, key: ProductKey) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Look up a product.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.entries.get(key).map(CatalogEntry::product)
    }

    /// Key for a product id.
    pub fn key_for(&self, id: &str) -> Option<ProductKey> {
        self.ids.get(id).copied()
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &CatalogEntry)> {
        self.entries.iter()
    }

    /// Totals across every catalog row.
    pub fn totals(&self) -> DealTotals {
        aggregate(self.entries.values())
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currency for every price in the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::BillingType;

    use super::*;

    fn starter() -> Product {
        Product::new("starter", "Starter", BillingType::Monthly, dec!(1000), dec!(0.25))
    }

    fn growth() -> Product {
        Product::new("growth", "Growth", BillingType::OneTime, dec!(500), dec!(0.30))
    }

    #[test]
    fn insert_rejects_duplicate_ids() -> TestResult {
        let mut catalog = Catalog::new(GBP);

        catalog.insert(starter())?;

        assert_eq!(
            catalog.insert(starter()),
            Err(CatalogError::DuplicateProduct("starter".to_string()))
        );
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn catalog_rows_carry_overrides() -> TestResult {
        let mut catalog = Catalog::new(GBP);
        let key = catalog.insert(starter())?;

        catalog.set_overrides(key, RateOverrides::new(dec!(0.10), dec!(0.20)))?;

        let pricing = catalog.get(key).ok_or("missing row")?.pricing();

        assert_eq!(pricing.discounted_price, dec!(880));
        assert_eq!(pricing.agent_commission, dec!(-120));

        Ok(())
    }

    #[test]
    fn rejected_rate_input_leaves_row_unchanged() -> TestResult {
        let mut catalog = Catalog::new(GBP);
        let key = catalog.insert(starter())?;

        catalog.apply_rate_input(key, RateField::Discount, "20", RatePolicy::Strict)?;

        let result = catalog.apply_rate_input(key, RateField::Discount, "x", RatePolicy::Strict);

        assert!(matches!(result, Err(CatalogError::RateInput(_))));
        assert_eq!(
            catalog.get(key).ok_or("missing row")?.overrides().discount_rate,
            Some(dec!(0.2))
        );

        Ok(())
    }

    #[test]
    fn totals_cover_every_row() -> TestResult {
        let mut catalog = Catalog::new(GBP);
        catalog.insert(starter())?;
        catalog.insert(growth())?;

        let totals = catalog.totals();

        assert_eq!(totals.total_price, dec!(1900));
        assert_eq!(totals.agent_commission, dec!(400));

        Ok(())
    }

    #[test]
    fn update_renames_and_guards_duplicates() -> TestResult {
        let mut catalog = Catalog::new(GBP);
        let starter_key = catalog.insert(starter())?;
        catalog.insert(growth())?;

        catalog.update(starter_key, |product| {
            product.id = "starter-v2".to_string();
            product.base_price = dec!(1200);
        })?;

        assert_eq!(catalog.key_for("starter-v2"), Some(starter_key));
        assert_eq!(catalog.key_for("starter"), None);

        let result = catalog.update(starter_key, |product| product.id = "growth".to_string());

        assert_eq!(result, Err(CatalogError::DuplicateProduct("growth".to_string())));
        assert_eq!(
            catalog.product(starter_key).map(|product| product.id.as_str()),
            Some("starter-v2")
        );

        Ok(())
    }

    #[test]
    fn remove_forgets_id() -> TestResult {
        let mut catalog = Catalog::new(GBP);
        let key = catalog.insert(starter())?;

        let removed = catalog.remove(key).ok_or("expected product")?;

        assert_eq!(removed.id, "starter");
        assert!(catalog.is_empty());
        assert_eq!(catalog.key_for("starter"), None);
        assert!(catalog.remove(key).is_none());

        Ok(())
    }
}
