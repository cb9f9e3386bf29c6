pub mod advances;
pub mod assets;
pub mod catalog;
pub mod init;
pub mod report;
pub mod status;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::client::HttpSource;
use crate::error::{GymbiosError, Result};
use crate::settings::Settings;
use crate::source::{LedgerSource, SnapshotSource};

#[derive(Parser)]
#[command(name = "gymbios", about = "Financial reporting for GymBios gym and wellness businesses.")]
pub struct Cli {
    /// Read data from a JSON snapshot instead of the API
    #[arg(long, global = true)]
    pub snapshot: Option<String>,
    /// API base URL (overrides settings)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where report data is read from, resolved from global flags and settings.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub snapshot: Option<String>,
    pub api_url: Option<String>,
}

impl Globals {
    pub fn open_source(&self, settings: &Settings) -> Result<Box<dyn LedgerSource>> {
        if let Some(path) = &self.snapshot {
            debug!(path, "using snapshot source");
            return Ok(Box::new(SnapshotSource::open(Path::new(path))?));
        }
        let base_url = self
            .api_url
            .clone()
            .unwrap_or_else(|| settings.api_base_url.clone());
        if base_url.trim().is_empty() {
            return Err(GymbiosError::Settings(
                "No API URL configured. Run `gymbios init --api-url URL` or pass --snapshot FILE."
                    .to_string(),
            ));
        }
        debug!(%base_url, "using HTTP source");
        Ok(Box::new(HttpSource::new(
            &base_url,
            settings.api_token.clone(),
            settings.request_timeout(),
        )?))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the settings file: API URL, company name, currency.
    Init {
        /// Directory for cached data
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Company name printed above reports
        #[arg(long)]
        company: Option<String>,
        /// Currency code used when formatting amounts
        #[arg(long)]
        currency: Option<String>,
        /// Prompt for an API token
        #[arg(long)]
        token: bool,
    },
    /// Generate financial reports.
    Report(ReportArgs),
    /// Asset registry with straight-line depreciation.
    Assets {
        /// Valuation date: YYYY-MM-DD (default: today)
        #[arg(long = "as-of")]
        as_of: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Salary advances with repayment schedules.
    Advances {
        /// Print every installment
        #[arg(long)]
        schedule: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List members (cached).
    Members {
        /// Bypass the cache
        #[arg(long)]
        refresh: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List training classes (cached).
    Classes {
        /// Bypass the cache
        #[arg(long)]
        refresh: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show current settings.
    Status,
    /// Print shell completions.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    TrialBalance,
    Pnl,
    BalanceSheet,
    Cashflow,
    Expenses,
    All,
}

impl ReportKind {
    pub fn report_name(self) -> &'static str {
        match self {
            ReportKind::TrialBalance => "trial-balance",
            ReportKind::Pnl => "pnl",
            ReportKind::BalanceSheet => "balance-sheet",
            ReportKind::Cashflow => "cashflow",
            ReportKind::Expenses => "expenses",
            ReportKind::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Month filter: YYYY-MM
    #[arg(long)]
    pub month: Option<String>,
    /// Year filter: YYYY
    #[arg(long)]
    pub year: Option<i32>,
    /// Start date: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Which report to produce
    #[arg(value_enum)]
    pub kind: ReportKind,
    #[command(flatten)]
    pub period: PeriodArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Print to stdout, or write to `output` creating parent directories.
pub(crate) fn emit(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            let p = PathBuf::from(path);
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&p, content)?;
            println!("Wrote {}", p.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Prepend company name as a header line if non-empty.
pub(crate) fn with_header(company_name: &str, body: String) -> String {
    if company_name.is_empty() {
        body
    } else {
        format!("{company_name}\n{body}")
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn csv_unsupported(what: &str) -> GymbiosError {
    GymbiosError::Other(format!("CSV output is not available for {what}"))
}
