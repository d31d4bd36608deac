//! Pipeline and dashboard aggregation

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::prospects::{Prospect, ProspectStatus};

/// Prospect count and value at one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStage {
    /// Stage
    pub status: ProspectStatus,

    /// Number of prospects at this stage
    pub count: usize,

    /// Summed estimated deal value
    pub value: Decimal,
}

/// Prospects grouped by stage, one entry per status in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: SmallVec<[PipelineStage; 7]>,
}

impl Pipeline {
    /// Group `prospects` by status.
    pub fn from_prospects<'a>(prospects: impl IntoIterator<Item = &'a Prospect>) -> Self {
        let mut stages: SmallVec<[PipelineStage; 7]> = ProspectStatus::ALL
            .iter()
            .map(|&status| PipelineStage {
                status,
                count: 0,
                value: Decimal::ZERO,
            })
            .collect();

        for prospect in prospects {
            if let Some(stage) = stages
                .iter_mut()
                .find(|stage| stage.status == prospect.status)
            {
                stage.count += 1;
                stage.value += prospect.deal_value;
            }
        }

        Self { stages }
    }

    /// Every stage, including empty ones.
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// A single stage.
    pub fn stage(&self, status: ProspectStatus) -> Option<&PipelineStage> {
        self.stages.iter().find(|stage| stage.status == status)
    }

    /// Value across stages that are still active.
    pub fn active_value(&self) -> Decimal {
        self.stages
            .iter()
            .filter(|stage| stage.status.is_active())
            .map(|stage| stage.value)
            .sum()
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// All prospects
    pub total_prospects: usize,

    /// Prospects neither won nor lost
    pub active_prospects: usize,

    /// Won prospects
    pub won: usize,

    /// Lost prospects
    pub lost: usize,

    /// Estimated value of active prospects
    pub pipeline_value: Decimal,

    /// Estimated value of won prospects
    pub won_value: Decimal,

    /// `won / (won + lost) * 100`, zero when nothing has closed
    pub conversion_rate_percent: Decimal,

    /// Mean lead score, zero for no prospects
    pub average_lead_score: Decimal,
}

impl DashboardStats {
    /// Compute dashboard figures.
    pub fn from_prospects<'a>(prospects: impl IntoIterator<Item = &'a Prospect>) -> Self {
        let mut stats = DashboardStats::default();
        let mut lead_score_total: u64 = 0;

        for prospect in prospects {
            stats.total_prospects += 1;
            lead_score_total += u64::from(prospect.lead_score);

            match prospect.status {
                ProspectStatus::Won => {
                    stats.won += 1;
                    stats.won_value += prospect.deal_value;
                }
                ProspectStatus::Lost => stats.lost += 1,
                _ => {
                    stats.active_prospects += 1;
                    stats.pipeline_value += prospect.deal_value;
                }
            }
        }

        let closed = stats.won + stats.lost;

        if closed > 0 {
            stats.conversion_rate_percent =
                Decimal::from(stats.won) / Decimal::from(closed) * Decimal::ONE_HUNDRED;
        }

        if stats.total_prospects > 0 {
            stats.average_lead_score =
                Decimal::from(lead_score_total) / Decimal::from(stats.total_prospects);
        }

        stats
    }
}
