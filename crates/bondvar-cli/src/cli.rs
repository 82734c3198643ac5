//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, Dv01Args, ScenariosArgs, TableArgs, VarArgs};

/// BondVar - VaR and DV01 for weighted bond-index portfolios
#[derive(Parser)]
#[command(name = "bondvar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the configuration and the series come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Configuration file (.json or .toml). Defaults to the standard basket.
    #[arg(short, long, env = "BONDVAR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Long-format series CSV (series_id,date,value)
    #[arg(long, env = "BONDVAR_DATA", global = true, conflicts_with = "storage")]
    pub data: Option<PathBuf>,

    /// Directory holding securities.csv and historical_data.csv
    #[arg(long, env = "BONDVAR_STORAGE", global = true)]
    pub storage: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Portfolio VaR (historical and Monte Carlo)
    Var(VarArgs),

    /// Finite-difference DV01 per instrument
    Dv01(Dv01Args),

    /// Show the combined metrics table
    Table(TableArgs),

    /// Run the configured weighting scenarios
    Scenarios(ScenariosArgs),

    /// Show, create, or validate configuration files
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}
