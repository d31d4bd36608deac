//! SalesPulse CLI
//!
//! Prices the catalog, prospect deals and ad-hoc quotes from a fixture set and
//! prints them as tables.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use thiserror::Error;
use tracing::{error, info};

use salespulse::{
    deals::{Deal, DealError},
    fixtures::{Fixture, FixtureError},
    money::currency_for_code,
    pipeline::{DashboardStats, Pipeline},
    products::{BillingType, PriceError, Product, check_base_price},
    prospects::{Prospect, filter::ProspectFilter, sort::ProspectSort},
    rates::{RateField, RateInputError, RatePolicy, parse_percent_points},
    report::{
        ReportError,
        lines::{write_catalog, write_deal},
        pipeline::{write_deal_summary, write_pipeline, write_prospects},
    },
};

use crate::config::{Command, Config, QuoteArgs};

mod config;
mod observability;

/// CLI Errors
#[derive(Debug, Error)]
enum CliError {
    /// Fixture loading failed
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Report rendering failed
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Rate input was rejected
    #[error(transparent)]
    RateInput(#[from] RateInputError),

    /// A deal edit failed
    #[error(transparent)]
    Deal(#[from] DealError),

    /// The quoted base price was rejected
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Currency code is not supported
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Writing output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// SalesPulse CLI entry point
fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            // --help and --version also arrive here
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Failed to initialise logging: {err}");
        }

        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match run(&config, &mut handle) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, out: &mut impl Write) -> Result<(), CliError> {
    if let Command::Quote(args) = &config.command {
        return quote(args, config.rate_policy, out);
    }

    let mut fixture = Fixture::with_base_path(&config.fixtures.fixtures);
    fixture.load_set(&config.fixtures.set)?;

    info!(set = %config.fixtures.set, "loaded fixture set");

    let currency = fixture.currency()?;

    match &config.command {
        Command::Catalog => write_catalog(out, fixture.catalog()?)?,
        Command::Deals { prospect } => {
            let prospects: Vec<&Prospect> = match prospect {
                Some(id) => vec![fixture.prospect(id)?],
                None => fixture.prospects().filter(|p| !p.deals.is_empty()).collect(),
            };

            for prospect in prospects {
                write_deal_summary(out, prospect, &prospect.deal_summary(), currency)?;

                for deal in &prospect.deals {
                    write_deal(out, deal, currency)?;
                }
            }
        }
        Command::Pipeline {
            search,
            status,
            priority,
            industry,
            sort,
            direction,
        } => {
            let mut filter = ProspectFilter::new();

            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(status) = status {
                filter = filter.status(*status);
            }
            if let Some(priority) = priority {
                filter = filter.priority(*priority);
            }
            if let Some(industry) = industry {
                filter = filter.industry(industry);
            }

            let mut matching = filter.apply(fixture.prospects());
            ProspectSort::new(*sort, *direction).sort(&mut matching);

            write_prospects(out, &matching, currency)?;

            let pipeline = Pipeline::from_prospects(matching.iter().copied());
            let stats = DashboardStats::from_prospects(matching.iter().copied());

            write_pipeline(out, &pipeline, &stats, currency)?;
        }
        Command::Quote(_) => {}
    }

    Ok(())
}

fn quote(args: &QuoteArgs, policy: RatePolicy, out: &mut impl Write) -> Result<(), CliError> {
    let currency = currency_for_code(&args.currency)
        .ok_or_else(|| CliError::UnknownCurrency(args.currency.clone()))?;

    let billing_type = if args.one_time {
        BillingType::OneTime
    } else {
        BillingType::Monthly
    };

    let product = Product::new(
        "quote",
        "Quote",
        billing_type,
        check_base_price(args.price)?,
        parse_percent_points(&args.commission)?,
    );

    let mut deal = Deal::new("Quote");
    let index = deal.attach(&product);

    if let Some(input) = &args.negotiated {
        deal.apply_rate_input(index, RateField::NegotiatedCommission, input, policy)?;
    }
    if let Some(input) = &args.discount {
        deal.apply_rate_input(index, RateField::Discount, input, policy)?;
    }

    write_deal(out, &deal, currency)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn args(price: Decimal) -> QuoteArgs {
        QuoteArgs {
            price,
            commission: "25".to_string(),
            negotiated: Some("10".to_string()),
            discount: Some("20".to_string()),
            one_time: false,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn quote_prints_line_and_totals() -> TestResult {
        let mut out = Vec::new();

        quote(&args(dec!(1000)), RatePolicy::Permissive, &mut out)?;
        let output = String::from_utf8(out)?;

        assert!(output.contains("Quote (Proposal)"));
        assert!(output.contains("$880.00"));
        assert!(output.contains("-12%"));

        Ok(())
    }

    #[test]
    fn quote_rejects_negative_price() {
        let mut out = Vec::new();

        let result = quote(&args(dec!(-100)), RatePolicy::Permissive, &mut out);

        assert!(matches!(
            result,
            Err(CliError::Price(PriceError::Negative(price))) if price == dec!(-100)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn quote_rejects_out_of_range_discount_when_strict() {
        let mut out = Vec::new();
        let args = QuoteArgs {
            discount: Some("150".to_string()),
            ..args(dec!(1000))
        };

        let result = quote(&args, RatePolicy::Strict, &mut out);

        assert!(matches!(
            result,
            Err(CliError::Deal(DealError::RateInput(RateInputError::OutOfRange(rate))))
                if rate == dec!(1.5)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn quote_rejects_huge_inputs() {
        let mut out = Vec::new();

        let huge_price = quote(
            &args(dec!(70000000000000000000000000000)),
            RatePolicy::Permissive,
            &mut out,
        );
        let huge_discount = quote(
            &QuoteArgs {
                discount: Some("7000000000000000000000000000".to_string()),
                ..args(dec!(1000))
            },
            RatePolicy::Permissive,
            &mut out,
        );

        assert!(matches!(
            huge_price,
            Err(CliError::Price(PriceError::TooLarge(_)))
        ));
        assert!(matches!(
            huge_discount,
            Err(CliError::Deal(DealError::RateInput(RateInputError::TooLarge(_))))
        ));
    }
}
