//! Line-item tables for deals, the catalog and single quotes.

use std::io;

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color,
        object::{Columns, Rows},
    },
};

use crate::{
    catalog::{Catalog, CatalogEntry},
    deals::{Deal, DealLineItem},
    pricing::{Priced, PricingInput},
    products::BillingType,
    report::{ReportError, apply_theme, billing::savings_label, money_cell, percent_cell, rate_cell},
    totals::{DealTotals, aggregate},
};

const AGENT_COMMISSION_COLUMN: usize = 8;

/// One row of a line-item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRow {
    /// Display name
    pub name: String,

    /// Billing type
    pub billing_type: BillingType,

    /// Pricing inputs
    pub input: PricingInput,
}

impl Priced for LineRow {
    fn pricing_input(&self) -> PricingInput {
        self.input
    }
}

impl From<&DealLineItem> for LineRow {
    fn from(item: &DealLineItem) -> Self {
        Self {
            name: item.name().to_string(),
            billing_type: item.billing_type(),
            input: item.pricing_input(),
        }
    }
}

impl From<&CatalogEntry> for LineRow {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.product().name.clone(),
            billing_type: entry.product().billing_type,
            input: entry.pricing_input(),
        }
    }
}

/// Write a deal's line items with a totals row.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or writing fails.
pub fn write_deal(
    out: &mut impl io::Write,
    deal: &Deal,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let rows: Vec<LineRow> = deal.line_items().iter().map(LineRow::from).collect();

    writeln!(out, "\n{} ({})", deal.name(), deal.status().label())?;

    write_line_table(out, &rows, currency)
}

/// Write every catalog row with a totals row.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or writing fails.
pub fn write_catalog(out: &mut impl io::Write, catalog: &Catalog) -> Result<(), ReportError> {
    let rows: Vec<LineRow> = catalog.iter().map(|(_, entry)| LineRow::from(entry)).collect();

    write_line_table(out, &rows, catalog.currency())
}

/// Write a table of priced rows followed by their totals.
///
/// Rows whose agent commission is negative are highlighted.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or writing fails.
pub fn write_line_table(
    out: &mut impl io::Write,
    rows: &[LineRow],
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();
    let mut negative_rows: SmallVec<[usize; 8]> = SmallVec::new();

    builder.push_record([
        "#",
        "Product",
        "Billing",
        "Base Price",
        "Commission",
        "Discount",
        "Total Price",
        "Discounted",
        "Agent Commission",
        "System Rate",
        "Customer Savings",
    ]);

    for (idx, row) in rows.iter().enumerate() {
        let pricing = row.pricing();

        if pricing.is_negative_margin() {
            negative_rows.push(idx + 1);
        }

        builder.push_record([
            format!("{}", idx + 1),
            row.name.clone(),
            row.billing_type.to_string(),
            money_cell(row.input.base_price, currency)?,
            commission_cell(&row.input),
            row.input.discount_rate.map_or_else(|| "-".to_string(), rate_cell),
            money_cell(pricing.total_price, currency)?,
            money_cell(pricing.discounted_price, currency)?,
            money_cell(pricing.agent_commission, currency)?,
            percent_cell(pricing.system_rate_percent),
            savings_label(pricing.customer_savings, row.billing_type, currency)?,
        ]);
    }

    let totals = aggregate(rows);
    let totals_row = rows.len() + 1;

    push_totals_record(&mut builder, &totals, currency)?;

    let mut table = builder.build();

    apply_theme(&mut table, &[totals_row]);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Rows::last(), Color::BOLD);
    table.modify(Columns::new(3..), Alignment::right());

    for row in negative_rows {
        table.modify((row, AGENT_COMMISSION_COLUMN), Color::FG_RED);
    }

    if totals.is_negative_margin() {
        table.modify((totals_row, AGENT_COMMISSION_COLUMN), Color::FG_RED);
    }

    writeln!(out, "{table}")?;

    Ok(())
}

fn commission_cell(input: &PricingInput) -> String {
    match input.negotiated_commission_rate {
        Some(rate) if rate != input.base_commission_rate => format!(
            "{} (base {})",
            rate_cell(rate),
            rate_cell(input.base_commission_rate)
        ),
        Some(rate) => rate_cell(rate),
        None => rate_cell(input.base_commission_rate),
    }
}

fn push_totals_record(
    builder: &mut Builder,
    totals: &DealTotals,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    builder.push_record([
        String::new(),
        "Total".to_string(),
        String::new(),
        money_cell(totals.base_price, currency)?,
        String::new(),
        String::new(),
        money_cell(totals.total_price, currency)?,
        money_cell(totals.discounted_price, currency)?,
        money_cell(totals.agent_commission, currency)?,
        percent_cell(totals.system_rate_percent()),
        money_cell(totals.customer_savings, currency)?,
    ]);

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    #[test]
    fn deal_table_lists_items_and_totals() -> TestResult {
        let mut deal = Deal::new("Acme rollout");
        let index = deal.attach(&Product::new(
            "starter",
            "Starter",
            BillingType::Monthly,
            dec!(1000),
            dec!(0.25),
        ));
        deal.set_negotiated_commission_rate(index, Some(dec!(0.10)))?;
        deal.set_discount_rate(index, Some(dec!(0.20)))?;

        let mut out = Vec::new();
        write_deal(&mut out, &deal, GBP)?;
        let output = String::from_utf8(out)?;

        assert!(output.contains("Acme rollout (Proposal)"));
        assert!(output.contains("Starter"));
        assert!(output.contains("10% (base 25%)"));
        assert!(output.contains("£880.00"));
        assert!(output.contains("£220.00/mo"));
        assert!(output.contains("-12%"));
        assert!(output.contains("Total"));

        Ok(())
    }

    #[test]
    fn empty_table_still_has_totals() -> TestResult {
        let mut out = Vec::new();
        write_line_table(&mut out, &[], GBP)?;
        let output = String::from_utf8(out)?;

        assert!(output.contains("Total"));
        assert!(output.contains("£0.00"));

        Ok(())
    }

    #[test]
    fn commission_cell_shows_base_only_when_overridden() {
        let input = PricingInput::new(dec!(100), dec!(0.25));

        assert_eq!(commission_cell(&input), "25%");
        assert_eq!(
            commission_cell(&input.with_negotiated_commission_rate(dec!(0.25))),
            "25%"
        );
        assert_eq!(
            commission_cell(&input.with_negotiated_commission_rate(dec!(0.1))),
            "10% (base 25%)"
        );
    }
}
