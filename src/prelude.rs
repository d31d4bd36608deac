//! SalesPulse prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogEntry, CatalogError},
    deals::{
        Deal, DealError, DealLineItem, DealStatus,
        summary::{DealSummary, ProspectDealSummary},
    },
    fixtures::{Fixture, FixtureError},
    pipeline::{DashboardStats, Pipeline, PipelineStage},
    pricing::{LineItemPricing, Priced, PricingInput, price_line_item},
    products::{BillingType, Product, ProductKey},
    prospects::{
        Priority, Prospect, ProspectKey, ProspectStatus,
        filter::ProspectFilter,
        sort::{ProspectSort, SortDirection, SortField},
    },
    rates::{RateField, RateInputError, RateOverrides, RatePolicy, parse_percent_points},
    report::ReportError,
    totals::{DealTotals, aggregate},
};
