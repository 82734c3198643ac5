//! Config command implementation.
//!
//! Shows the effective configuration, writes the standard one, and
//! validates configuration files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use bondvar_config::{BondVarConfig, ConfigError, ConfigFormat};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{
    print_error, print_header, print_json, print_output, print_success, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (--config, or the standard basket)
    Show,

    /// Write the standard configuration to a file
    Init(InitArgs),

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output file (.json or .toml)
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to validate (defaults to --config)
    pub path: Option<PathBuf>,
}

/// Instrument row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
struct InstrumentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Yield series")]
    yield_series: String,
    #[tabled(rename = "Price series")]
    price_series: String,
    #[tabled(rename = "Weight")]
    weight: f64,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Init(init_args) => execute_init(init_args),
        ConfigCommand::Validate(validate_args) => execute_validate(validate_args, ctx),
    }
}

/// Show the effective configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    match ctx.format {
        OutputFormat::Table => {
            let window = match (config.portfolio.start_date, config.portfolio.end_date) {
                (Some(start), Some(end)) => format!("{start} to {end}"),
                (Some(start), None) => format!("{start} to today"),
                (None, Some(end)) => format!("{} days to {end}", config.portfolio.lookback_days),
                (None, None) => format!("last {} days", config.portfolio.lookback_days),
            };
            let levels: Vec<String> = config
                .risk
                .confidence_levels
                .iter()
                .map(|l| format!("{l}%"))
                .collect();
            let settings = vec![
                KeyValue::new("Portfolio", config.portfolio.name.as_str()),
                KeyValue::new("Window", window),
                KeyValue::new("Confidence levels", levels.join(", ")),
                KeyValue::new("Monte Carlo paths", config.risk.monte_carlo_paths.to_string()),
                KeyValue::new("Monte Carlo seed", config.risk.monte_carlo_seed.to_string()),
                KeyValue::new("Missing policy", config.risk.missing_policy.to_string()),
                KeyValue::new(
                    "DV01 instruments",
                    config
                        .risk
                        .dv01_instrument_limit
                        .map_or_else(|| "all".to_string(), |n| format!("first {n}")),
                ),
                KeyValue::new("Scenarios", config.scenarios.len().to_string()),
            ];

            if !ctx.quiet {
                print_header("Configuration");
            }
            print_output(&settings, ctx.format)?;
            if !ctx.quiet {
                print_header("Instruments");
            }
            print_output(&instrument_rows(&config), ctx.format)?;
        }
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Csv => print_output(&instrument_rows(&config), ctx.format)?,
        OutputFormat::Minimal => print!("{}", config.to_string_as(ConfigFormat::Toml)?),
    }

    Ok(())
}

fn instrument_rows(config: &BondVarConfig) -> Vec<InstrumentRow> {
    config
        .portfolio
        .instruments
        .iter()
        .map(|i| InstrumentRow {
            name: i.name.clone(),
            yield_series: i.yield_series.clone(),
            price_series: i.price_series.clone(),
            weight: i.weight,
        })
        .collect()
}

/// Write the standard configuration.
fn execute_init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::AlreadyExists(args.path).into());
    }
    BondVarConfig::standard().save_to_path(&args.path)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}

/// Validate a configuration file, listing every problem.
fn execute_validate(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let path = args
        .path
        .or_else(|| ctx.input.config.clone())
        .ok_or_else(|| CliError::InvalidArgument("no file given; pass a path or --config".to_string()))?;

    match BondVarConfig::load_from_path(&path) {
        Ok(config) => {
            print_success(&format!(
                "{} is valid ({} instruments, {} scenarios)",
                path.display(),
                config.portfolio.instruments.len(),
                config.scenarios.len()
            ));
            Ok(())
        }
        Err(ConfigError::MultipleValidationErrors(errors)) => {
            for error in &errors {
                print_error(&error.to_string());
            }
            Err(anyhow::anyhow!("{} has {} errors", path.display(), errors.len()))
        }
        Err(err) => Err(err.into()),
    }
}
