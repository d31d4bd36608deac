//! Prospect, pipeline and dashboard tables.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color,
        object::{Columns, Rows},
    },
};

use crate::{
    deals::summary::ProspectDealSummary,
    pipeline::{DashboardStats, Pipeline},
    prospects::Prospect,
    report::{ReportError, apply_theme, money_cell, percent_cell},
};

/// Write a list of prospects.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or writing fails.
pub fn write_prospects(
    out: &mut impl io::Write,
    prospects: &[&Prospect],
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Name",
        "Company",
        "Industry",
        "Status",
        "Priority",
        "Deal Value",
        "Lead Score",
        "Last Contact",
    ]);

    for prospect in prospects {
        builder.push_record([
            prospect.name.clone(),
            prospect.company.clone(),
            prospect.industry.clone(),
            prospect.status.to_string(),
            prospect.priority.to_string(),
            money_cell(prospect.deal_value, currency)?,
            prospect.lead_score.to_string(),
            prospect
                .last_contact
                .map_or_else(|| "-".to_string(), |date| date.to_string()),
        ]);
    }

    let mut table = builder.build();

    apply_theme(&mut table, &[]);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(5..7), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the pipeline by stage followed by dashboard figures.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or writing fails.
pub fn write_pipeline(
    out: &mut impl io::Write,
    pipeline: &Pipeline,
    stats: &DashboardStats,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Stage", "Prospects", "Value"]);

    for stage in pipeline.stages() {
        builder.push_record([
            stage.status.to_string(),
            stage.count.to_string(),
            money_cell(stage.value, currency)?,
        ]);
    }

    let mut table = builder.build();

    apply_theme(&mut table, &[]);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..), Alignment::right());

    writeln!(out, "{table}")?;

    writeln!(
        out,
        " Prospects: {} ({} active, {} won, {} lost)",
        stats.total_prospects, stats.active_prospects, stats.won, stats.lost
    )?;
    writeln!(
        out,
        " Pipeline value: {}",
        money_cell(stats.pipeline_value, currency)?
    )?;
    writeln!(out, " Won value: {}", money_cell(stats.won_value, currency)?)?;
    writeln!(
        out,
        " Conversion rate: {}",
        percent_cell(stats.conversion_rate_percent)
    )?;
    writeln!(
        out,
        " Average lead score: {}",
        stats.average_lead_score.round_dp(1).normalize()
    )?;

    Ok(())
}

/// Write the deal panel for one prospect.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or writing fails.
pub fn write_deal_summary(
    out: &mut impl io::Write,
    prospect: &Prospect,
    summary: &ProspectDealSummary,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Deal",
        "Status",
        "Items",
        "Discounted",
        "Agent Commission",
        "Customer Savings",
    ]);

    for deal in &summary.deals {
        builder.push_record([
            deal.name.clone(),
            deal.status.label().to_string(),
            deal.line_items.to_string(),
            money_cell(deal.totals.discounted_price, currency)?,
            money_cell(deal.totals.agent_commission, currency)?,
            money_cell(deal.totals.customer_savings, currency)?,
        ]);
    }

    let mut table = builder.build();

    apply_theme(&mut table, &[]);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "\n{} - {}", prospect.company, prospect.name)?;
    writeln!(out, "{table}")?;
    writeln!(
        out,
        " Won: {}  Open: {} across {} deals",
        money_cell(summary.won.discounted_price, currency)?,
        money_cell(summary.open.discounted_price, currency)?,
        summary.open_deals()
    )?;

    Ok(())
}
