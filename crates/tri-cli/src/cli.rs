//! CLI argument definitions for `triangulate`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tri_match::{DEFAULT_FUZZY_THRESHOLD, DuplicatePolicy, MatchStrategy};
use tri_model::Role;

#[derive(Parser)]
#[command(
    name = "triangulate",
    version,
    about = "Reconcile administered and distributed vaccine doses",
    long_about = "Reconcile facility-reported administered doses with supply-chain \
                  distributed doses.\n\n\
                  Matches facilities per reporting period, computes utilization rates \
                  and flags facilities outside the configured vaccine thresholds."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match two files, compute utilization and write the exports.
    Run(RunArgs),

    /// Show how a file's headers bind to canonical fields.
    Inspect(InspectArgs),

    /// List configured vaccines and their thresholds.
    Vaccines(VaccinesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Administered doses file (CSV or Excel).
    #[arg(long, value_name = "FILE")]
    pub administered: PathBuf,

    /// Distributed doses file (CSV or Excel).
    #[arg(long, value_name = "FILE")]
    pub distributed: PathBuf,

    /// How facilities are paired across the two files.
    #[arg(long, value_enum, default_value = "exact")]
    pub strategy: StrategyArg,

    /// Minimum similarity (0-100) for fuzzy name matches.
    #[arg(long = "fuzzy-threshold", value_name = "SCORE", default_value_t = DEFAULT_FUZZY_THRESHOLD)]
    pub fuzzy_threshold: f64,

    /// Handling of repeated facility/period rows on one side.
    #[arg(long, value_enum, default_value = "fan-out")]
    pub duplicates: DuplicatesArg,

    /// Threshold file replacing the built-in vaccine thresholds.
    #[arg(long, value_name = "FILE")]
    pub thresholds: Option<PathBuf>,

    /// Restrict the views to one region.
    #[arg(long)]
    pub region: Option<String>,

    /// Restrict the views to one zone.
    #[arg(long)]
    pub zone: Option<String>,

    /// Restrict the views to one woreda.
    #[arg(long)]
    pub woreda: Option<String>,

    /// Restrict the views to one reporting period.
    #[arg(long)]
    pub period: Option<String>,

    /// Vaccine for the category and extremity summary views.
    #[arg(long)]
    pub vaccine: Option<String>,

    /// Output directory for exports (default: <ADMINISTERED dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// File to inspect (CSV or Excel).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Which side the file belongs to.
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Threshold file whose vaccine list drives the quantity columns.
    #[arg(long, value_name = "FILE")]
    pub thresholds: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VaccinesArgs {
    /// Threshold file replacing the built-in vaccine thresholds.
    #[arg(long, value_name = "FILE")]
    pub thresholds: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Exact,
    Fuzzy,
}

impl StrategyArg {
    pub fn to_strategy(self, threshold: f64) -> MatchStrategy {
        match self {
            Self::Exact => MatchStrategy::Exact,
            Self::Fuzzy => MatchStrategy::Fuzzy { threshold },
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicatesArg {
    FanOut,
    KeepFirst,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(value: DuplicatesArg) -> Self {
        match value {
            DuplicatesArg::FanOut => Self::FanOut,
            DuplicatesArg::KeepFirst => Self::KeepFirst,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Administered,
    Distributed,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Administered => Self::Administered,
            RoleArg::Distributed => Self::Distributed,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
