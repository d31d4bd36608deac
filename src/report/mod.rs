//! Reports
//!
//! Terminal tables for deals, the catalog and the sales pipeline.

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    Table,
    grid::config::HorizontalLine,
    settings::{Style, Theme},
};
use thiserror::Error;

use crate::{
    money::{MoneyConversionError, to_money},
    rates::to_percent_points,
};

pub mod billing;
pub mod lines;
pub mod pipeline;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An amount could not be shown as money.
    #[error(transparent)]
    Money(#[from] MoneyConversionError),

    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Format an amount in `currency`.
pub(crate) fn money_cell(amount: Decimal, currency: &'static Currency) -> Result<String, ReportError> {
    Ok(to_money(amount, currency)?.to_string())
}

/// Format a fraction as percent points, e.g. `0.125` as `12.5%`.
pub(crate) fn rate_cell(rate: Decimal) -> String {
    percent_cell(to_percent_points(rate))
}

/// Format percent points, e.g. `-12` as `-12%`.
pub(crate) fn percent_cell(points: Decimal) -> String {
    format!("{}%", points.round_dp(2).normalize())
}

/// Rounded theme with a rule under the header and above each row in `rules`.
pub(crate) fn apply_theme(table: &mut Table, rules: &[usize]) {
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in rules {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
}
