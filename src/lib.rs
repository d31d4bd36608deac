//! SalesPulse
//!
//! SalesPulse is the pricing core of a small CRM: per line item commission and
//! discount arithmetic, deal totals, and the prospect pipeline built on top.

pub mod catalog;
pub mod deals;
pub mod fixtures;
pub mod money;
pub mod pipeline;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod prospects;
pub mod rates;
pub mod report;
pub mod totals;
