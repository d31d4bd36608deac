//! Prospect sorting

use std::cmp::Ordering;

use crate::prospects::Prospect;

/// Column to sort prospects by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortField {
    /// Contact name, case-insensitive
    #[default]
    Name,

    /// Company name, case-insensitive
    Company,

    /// Estimated deal value
    DealValue,

    /// Lead score
    LeadScore,

    /// Last contact date; never-contacted prospects sort first ascending
    LastContact,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,

    /// Largest first
    Descending,
}

/// A sort order for prospect lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProspectSort {
    /// Column
    pub field: SortField,

    /// Direction
    pub direction: SortDirection,
}

impl ProspectSort {
    /// Creates a sort order.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Compare two prospects under this order.
    pub fn compare(&self, a: &Prospect, b: &Prospect) -> Ordering {
        let ordering = match self.field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
            SortField::DealValue => a.deal_value.cmp(&b.deal_value),
            SortField::LeadScore => a.lead_score.cmp(&b.lead_score),
            SortField::LastContact => a.last_contact.cmp(&b.last_contact),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Sort in place. Ties keep their existing order.
    pub fn sort(&self, prospects: &mut [&Prospect]) {
        prospects.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal_macros::dec;

    use super::*;

    fn prospects() -> Vec<Prospect> {
        vec![
            Prospect {
                deal_value: dec!(12000),
                lead_score: 70,
                last_contact: Some(date(2024, 3, 1)),
                ..Prospect::new("b", "bea", "Zenith")
            },
            Prospect {
                deal_value: dec!(4000),
                lead_score: 90,
                last_contact: None,
                ..Prospect::new("a", "Alex", "Acme")
            },
            Prospect {
                deal_value: dec!(12000),
                lead_score: 40,
                last_contact: Some(date(2024, 1, 15)),
                ..Prospect::new("c", "Cam", "midway")
            },
        ]
    }

    fn sorted_ids(sort: ProspectSort, prospects: &[Prospect]) -> Vec<&str> {
        let mut refs: Vec<&Prospect> = prospects.iter().collect();
        sort.sort(&mut refs);

        refs.into_iter().map(|prospect| prospect.id.as_str()).collect()
    }

    #[test]
    fn names_sort_case_insensitively() {
        let prospects = prospects();

        assert_eq!(sorted_ids(ProspectSort::default(), &prospects), ["a", "b", "c"]);
        assert_eq!(
            sorted_ids(
                ProspectSort::new(SortField::Company, SortDirection::Ascending),
                &prospects
            ),
            ["a", "c", "b"]
        );
    }

    #[test]
    fn descending_value_keeps_ties_stable() {
        let prospects = prospects();

        assert_eq!(
            sorted_ids(
                ProspectSort::new(SortField::DealValue, SortDirection::Descending),
                &prospects
            ),
            ["b", "c", "a"]
        );
    }

    #[test]
    fn lead_score_and_last_contact() {
        let prospects = prospects();

        assert_eq!(
            sorted_ids(
                ProspectSort::new(SortField::LeadScore, SortDirection::Descending),
                &prospects
            ),
            ["a", "b", "c"]
        );
        assert_eq!(
            sorted_ids(
                ProspectSort::new(SortField::LastContact, SortDirection::Ascending),
                &prospects
            ),
            ["a", "c", "b"]
        );
    }
}
