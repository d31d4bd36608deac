//! Prospect filtering

use crate::prospects::{Priority, Prospect, ProspectStatus};

/// Criteria a prospect must all satisfy to be listed.
///
/// Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProspectFilter {
    search: Option<String>,
    status: Option<ProspectStatus>,
    priority: Option<Priority>,
    industry: Option<String>,
}

impl ProspectFilter {
    /// A filter that matches every prospect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive search over name, company and email. Blank text is ignored.
    #[must_use]
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();

        self.search = (!text.is_empty()).then(|| text.to_lowercase());
        self
    }

    /// Only prospects in `status`.
    #[must_use]
    pub fn status(mut self, status: ProspectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only prospects with `priority`.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Only prospects in `industry`, compared case-insensitively.
    #[must_use]
    pub fn industry(mut self, industry: &str) -> Self {
        self.industry = Some(industry.trim().to_lowercase());
        self
    }

    /// Returns true if `prospect` satisfies every criterion.
    pub fn matches(&self, prospect: &Prospect) -> bool {
        self.status.is_none_or(|status| prospect.status == status)
            && self
                .priority
                .is_none_or(|priority| prospect.priority == priority)
            && self
                .industry
                .as_deref()
                .is_none_or(|industry| prospect.industry.to_lowercase() == industry)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| matches_search(prospect, needle))
    }

    /// Matching prospects, in input order.
    pub fn apply<'a>(&self, prospects: impl IntoIterator<Item = &'a Prospect>) -> Vec<&'a Prospect> {
        prospects
            .into_iter()
            .filter(|prospect| self.matches(prospect))
            .collect()
    }
}

fn matches_search(prospect: &Prospect, needle: &str) -> bool {
    [&prospect.name, &prospect.company, &prospect.email]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
