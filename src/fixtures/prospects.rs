//! Prospect Fixtures

use jiff::civil::Date;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    prospects::{Priority, Prospect, ProspectStatus},
};

/// Wrapper for prospects in YAML
#[derive(Debug, Deserialize)]
pub struct ProspectsFixture {
    /// Prospects in list order
    pub prospects: Vec<ProspectFixture>,
}

/// Prospect Fixture
#[derive(Debug, Deserialize)]
pub struct ProspectFixture {
    /// Prospect id
    pub id: String,

    /// Contact name
    pub name: String,

    /// Company name
    pub company: String,

    /// Industry
    #[serde(default)]
    pub industry: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Pipeline stage
    #[serde(default)]
    pub status: ProspectStatus,

    /// Priority
    #[serde(default)]
    pub priority: Priority,

    /// Estimated deal value (e.g., "25000.00 USD")
    pub deal_value: String,

    /// Lead score, 0 to 100
    #[serde(default)]
    pub lead_score: u8,

    /// Last contact date (e.g., "2024-05-02")
    #[serde(default)]
    pub last_contact: Option<Date>,
}

impl ProspectFixture {
    /// Convert into a prospect with no deals, returning the currency of its deal value.
    ///
    /// # Errors
    ///
    /// Returns an error if the deal value cannot be parsed or the lead score is above 100.
    pub fn try_into_prospect(self) -> Result<(Prospect, &'static Currency), FixtureError> {
        let (deal_value, currency) = parse_price(&self.deal_value)?;

        if self.lead_score > 100 {
            return Err(FixtureError::InvalidLeadScore(self.lead_score));
        }

        let prospect = Prospect {
            id: self.id,
            name: self.name,
            company: self.company,
            industry: self.industry,
            email: self.email,
            status: self.status,
            priority: self.priority,
            deal_value,
            lead_score: self.lead_score,
            last_contact: self.last_contact,
            deals: Vec::new(),
        };

        Ok((prospect, currency))
    }
}
