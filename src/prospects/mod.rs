//! Prospects

use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Deserialize;
use slotmap::new_key_type;

use crate::deals::{Deal, summary::ProspectDealSummary};

pub mod filter;
pub mod sort;

new_key_type! {
    /// Prospect Key
    pub struct ProspectKey;
}

/// Pipeline stage of a prospect.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, clap::ValueEnum,
)]
pub enum ProspectStatus {
    /// Not yet contacted
    #[default]
    New,

    /// First contact made
    Contacted,

    /// Confirmed fit and budget
    Qualified,

    /// Proposal sent
    Proposal,

    /// Terms under discussion
    Negotiation,

    /// Closed and won
    Won,

    /// Closed and lost
    Lost,
}

impl ProspectStatus {
    /// Every status in pipeline order.
    pub const ALL: [ProspectStatus; 7] = [
        ProspectStatus::New,
        ProspectStatus::Contacted,
        ProspectStatus::Qualified,
        ProspectStatus::Proposal,
        ProspectStatus::Negotiation,
        ProspectStatus::Won,
        ProspectStatus::Lost,
    ];

    /// Returns true until the prospect is won or lost.
    pub fn is_active(self) -> bool {
        !matches!(self, ProspectStatus::Won | ProspectStatus::Lost)
    }
}

impl fmt::Display for ProspectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProspectStatus::New => "New",
            ProspectStatus::Contacted => "Contacted",
            ProspectStatus::Qualified => "Qualified",
            ProspectStatus::Proposal => "Proposal",
            ProspectStatus::Negotiation => "Negotiation",
            ProspectStatus::Won => "Won",
            ProspectStatus::Lost => "Lost",
        };

        f.write_str(label)
    }
}

/// How urgently a prospect should be worked.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, clap::ValueEnum,
)]
pub enum Priority {
    /// Low
    Low,

    /// Medium
    #[default]
    Medium,

    /// High
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => f.write_str("Low"),
            Priority::Medium => f.write_str("Medium"),
            Priority::High => f.write_str("High"),
        }
    }
}

/// A company being worked through the sales pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prospect {
    /// Stable identifier
    pub id: String,

    /// Contact name
    pub name: String,

    /// Company name
    pub company: String,

    /// Industry
    pub industry: String,

    /// Contact email
    pub email: String,

    /// Pipeline stage
    pub status: ProspectStatus,

    /// Priority
    pub priority: Priority,

    /// Estimated deal value
    pub deal_value: Decimal,

    /// Lead score, 0 to 100
    pub lead_score: u8,

    /// Date of the last contact, if any
    pub last_contact: Option<Date>,

    /// Deals owned by this prospect
    pub deals: Vec<Deal>,
}

impl Prospect {
    /// Creates a new prospect with default status and priority.
    pub fn new(id: impl Into<String>, name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    /// Summary of this prospect's deals.
    pub fn deal_summary(&self) -> ProspectDealSummary {
        ProspectDealSummary::from_deals(&self.deals)
    }
}
