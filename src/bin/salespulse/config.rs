//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use salespulse::{
    prospects::{
        Priority, ProspectStatus,
        sort::{SortDirection, SortField},
    },
    rates::RatePolicy,
};

/// SalesPulse deal calculator
#[derive(Debug, Parser)]
#[command(name = "salespulse", about = "SalesPulse deal and pipeline calculator", long_about = None)]
pub(crate) struct Config {
    /// Fixture settings.
    #[command(flatten)]
    pub fixtures: FixtureConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// How out-of-range rate input is treated
    #[arg(long, env = "SALESPULSE_RATE_POLICY", value_enum, default_value_t = RatePolicy::Permissive)]
    pub rate_policy: RatePolicy,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Fixture location settings.
#[derive(Debug, Args)]
pub(crate) struct FixtureConfig {
    /// Directory holding `products/`, `prospects/` and `deals/`
    #[arg(short = 'b', long, env = "SALESPULSE_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set name
    #[arg(short = 'f', long, env = "SALESPULSE_FIXTURE_SET", default_value = "demo")]
    pub set: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show the product catalog priced at base rates
    Catalog,

    /// Show deals, for every prospect or a single one
    Deals {
        /// Prospect id
        #[arg(short, long)]
        prospect: Option<String>,
    },

    /// Show prospects, the pipeline by stage and dashboard figures
    Pipeline {
        /// Case-insensitive search over name, company and email
        #[arg(short, long)]
        search: Option<String>,

        /// Only prospects at this stage
        #[arg(long, value_enum)]
        status: Option<ProspectStatus>,

        /// Only prospects with this priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// Only prospects in this industry
        #[arg(long)]
        industry: Option<String>,

        /// Sort field
        #[arg(long, value_enum, default_value_t = SortField::Name)]
        sort: SortField,

        /// Sort direction
        #[arg(long, value_enum, default_value_t = SortDirection::Ascending)]
        direction: SortDirection,
    },

    /// Price a single line item from the command line
    Quote(QuoteArgs),
}

/// Ad-hoc line item
#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Base price
    #[arg(long)]
    pub price: Decimal,

    /// Base commission in percent points (e.g. 25)
    #[arg(long)]
    pub commission: String,

    /// Negotiated commission in percent points
    #[arg(long)]
    pub negotiated: Option<String>,

    /// Discount in percent points
    #[arg(long)]
    pub discount: Option<String>,

    /// Bill once rather than monthly
    #[arg(long)]
    pub one_time: bool,

    /// ISO currency code (GBP, USD, EUR)
    #[arg(long, default_value = "USD")]
    pub currency: String,
}
