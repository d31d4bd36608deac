//! Deal summaries for the prospect deal panel.

use smallvec::SmallVec;

use crate::{
    deals::{Deal, DealStatus},
    totals::DealTotals,
};

/// Read-only view of one deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealSummary {
    /// Deal name
    pub name: String,

    /// Deal status
    pub status: DealStatus,

    /// Number of line items
    pub line_items: usize,

    /// Derived totals
    pub totals: DealTotals,
}

impl From<&Deal> for DealSummary {
    fn from(deal: &Deal) -> Self {
        Self {
            name: deal.name().to_string(),
            status: deal.status(),
            line_items: deal.line_items().len(),
            totals: deal.totals(),
        }
    }
}

/// Every deal of one prospect, with roll-ups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProspectDealSummary {
    /// Per-deal summaries in deal order
    pub deals: SmallVec<[DealSummary; 4]>,

    /// Totals across all deals
    pub totals: DealTotals,

    /// Totals across won deals only
    pub won: DealTotals,

    /// Totals across open deals
    pub open: DealTotals,
}

impl ProspectDealSummary {
    /// Summarise `deals`.
    pub fn from_deals<'a>(deals: impl IntoIterator<Item = &'a Deal>) -> Self {
        let deals: SmallVec<[DealSummary; 4]> = deals.into_iter().map(DealSummary::from).collect();

        let totals = deals.iter().map(|deal| &deal.totals).sum();
        let won = sum_where(&deals, |status| status == DealStatus::Won);
        let open = sum_where(&deals, DealStatus::is_open);

        Self {
            deals,
            totals,
            won,
            open,
        }
    }

    /// Number of deals still open.
    pub fn open_deals(&self) -> usize {
        self.deals
            .iter()
            .filter(|deal| deal.status.is_open())
            .count()
    }
}

fn sum_where(deals: &[DealSummary], keep: impl Fn(DealStatus) -> bool) -> DealTotals {
    deals
        .iter()
        .filter(|deal| keep(deal.status))
        .map(|deal| deal.totals)
        .sum()
}
