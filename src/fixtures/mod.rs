//! Fixtures
//!
//! Products, prospects and deals loaded from YAML files laid out as
//! `<base>/{products,prospects,deals}/<set>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    deals::DealError,
    fixtures::{deals::DealsFixture, products::ProductsFixture, prospects::ProspectsFixture},
    prospects::{Prospect, ProspectKey},
    rates::RateInputError,
};

pub mod deals;
pub mod products;
pub mod prospects;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Rate rejected by the input bounds
    #[error(transparent)]
    RateInput(#[from] RateInputError),

    /// Lead score outside 0 to 100
    #[error("Invalid lead score: {0}")]
    InvalidLeadScore(u8),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Prospect not found
    #[error("Prospect not found: {0}")]
    ProspectNotFound(String),

    /// Duplicate prospect id
    #[error("Duplicate prospect id: {0}")]
    DuplicateProspect(String),

    /// Currency mismatch between fixture prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog rejected a product
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Deal rejected a line item edit
    #[error(transparent)]
    Deal(#[from] DealError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog, created once the first product fixes the currency
    catalog: Option<Catalog>,

    /// Prospects with their deals
    prospects: SlotMap<ProspectKey, Prospect>,

    /// Prospect id -> `SlotMap` key
    prospect_keys: FxHashMap<String, ProspectKey>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            prospects: SlotMap::with_key(),
            prospect_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a product is
    /// invalid, or currencies differ.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("products", name)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;
        let count = fixture.products.len();

        for product_fixture in fixture.products {
            let (product, currency) = product_fixture.try_into_product()?;
            let currency = self.check_currency(currency)?;

            self.catalog
                .get_or_insert_with(|| Catalog::new(currency))
                .insert(product)?;
        }

        debug!(set = name, count, "loaded product fixtures");

        Ok(self)
    }

    /// Load prospects from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a prospect is
    /// invalid or duplicated, or currencies differ.
    pub fn load_prospects(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("prospects", name)?;
        let fixture: ProspectsFixture = serde_norway::from_str(&contents)?;
        let count = fixture.prospects.len();

        for prospect_fixture in fixture.prospects {
            let (prospect, currency) = prospect_fixture.try_into_prospect()?;
            self.check_currency(currency)?;

            if self.prospect_keys.contains_key(&prospect.id) {
                return Err(FixtureError::DuplicateProspect(prospect.id));
            }

            let id = prospect.id.clone();
            let key = self.prospects.insert(prospect);

            self.prospect_keys.insert(id, key);
        }

        debug!(set = name, count, "loaded prospect fixtures");

        Ok(self)
    }

    /// Load deals from a YAML fixture file
    ///
    /// Products and prospects must already be loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a deal
    /// refers to an unknown product or prospect.
    pub fn load_deals(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("deals", name)?;
        let fixture: DealsFixture = serde_norway::from_str(&contents)?;
        let count = fixture.deals.len();

        let catalog = self.catalog.as_ref().ok_or(FixtureError::NoCurrency)?;

        for deal_fixture in fixture.deals {
            let prospect = self
                .prospect_keys
                .get(&deal_fixture.prospect)
                .and_then(|key| self.prospects.get_mut(*key))
                .ok_or_else(|| FixtureError::ProspectNotFound(deal_fixture.prospect.clone()))?;

            prospect.deals.push(deal_fixture.try_into_deal(catalog)?);
        }

        debug!(set = name, count, "loaded deal fixtures");

        Ok(self)
    }

    /// Load a complete fixture set (products, prospects and deals with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn load_set(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.load_products(name)?
            .load_prospects(name)?
            .load_deals(name)
    }

    /// Load a complete fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_set(name)?;

        Ok(fixture)
    }

    /// The loaded catalog
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no products have been loaded.
    pub fn catalog(&self) -> Result<&Catalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Prospects in load order
    pub fn prospects(&self) -> impl Iterator<Item = &Prospect> {
        self.prospects.values()
    }

    /// Get a prospect by its string id
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProspectNotFound`] for an unknown id.
    pub fn prospect(&self, id: &str) -> Result<&Prospect, FixtureError> {
        self.prospect_keys
            .get(id)
            .and_then(|key| self.prospects.get(*key))
            .ok_or_else(|| FixtureError::ProspectNotFound(id.to_string()))
    }

    /// Currency shared by every price in the fixture set
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if nothing priced has been loaded.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        Ok(fs::read_to_string(&file_path)?)
    }

    fn check_currency(
        &mut self,
        currency: &'static Currency,
    ) -> Result<&'static Currency, FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(existing) => Ok(existing),
            None => {
                self.currency = Some(currency);
                Ok(currency)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_decimal_macros::dec;
    use rusty_money::iso::USD;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write(dir: &Path, kind: &str, name: &str, contents: &str) -> TestResult {
        fs::create_dir_all(dir.join(kind))?;
        fs::write(dir.join(kind).join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const PRODUCTS: &str = r#"
products:
  - id: starter
    name: Starter
    billing: Monthly
    price: "1000.00 USD"
    commission: "25%"
  - id: setup
    name: Onboarding
    billing: One-time
    price: "500.00 USD"
    commission: "0.30"
"#;

    const PROSPECTS: &str = r#"
prospects:
  - id: acme
    name: Jo Smith
    company: Acme Stores
    status: Negotiation
    deal_value: "1900.00 USD"
"#;

    const DEALS: &str = r#"
deals:
  - prospect: acme
    name: Acme rollout
    status: Negotiating
    items:
      - product: starter
      - product: setup
"#;

    #[test]
    fn loads_a_complete_set() -> TestResult {
        let dir = TempDir::new()?;
        write(dir.path(), "products", "test", PRODUCTS)?;
        write(dir.path(), "prospects", "test", PROSPECTS)?;
        write(dir.path(), "deals", "test", DEALS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_set("test")?;

        assert_eq!(fixture.currency()?, USD);
        assert_eq!(fixture.catalog()?.len(), 2);

        let acme = fixture.prospect("acme")?;
        let totals = acme.deal_summary().totals;

        assert_eq!(totals.total_price, dec!(1900));
        assert_eq!(totals.agent_commission, dec!(400));

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_rejected() -> TestResult {
        let dir = TempDir::new()?;
        write(dir.path(), "products", "test", PRODUCTS)?;
        write(
            dir.path(),
            "prospects",
            "test",
            "prospects:\n  - id: a\n    name: A\n    company: A\n    deal_value: \"1.00 GBP\"\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("test")?;

        assert!(matches!(
            fixture.load_prospects("test"),
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "USD" && found == "GBP"
        ));

        Ok(())
    }

    #[test]
    fn deals_need_known_prospects() -> TestResult {
        let dir = TempDir::new()?;
        write(dir.path(), "products", "test", PRODUCTS)?;
        write(dir.path(), "deals", "test", DEALS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("test")?;

        assert!(matches!(
            fixture.load_deals("test"),
            Err(FixtureError::ProspectNotFound(id)) if id == "acme"
        ));

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut fixture = Fixture::with_base_path("./does-not-exist");

        assert!(matches!(fixture.load_products("nope"), Err(FixtureError::Io(_))));
    }
}
