//! CLI command implementations.

pub mod config;
pub mod dv01;
pub mod scenarios;
pub mod table;
pub mod var;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use dv01::Dv01Args;
pub use scenarios::ScenariosArgs;
pub use table::TableArgs;
pub use var::VarArgs;

use anyhow::Result;
use clap::Args;

use bondvar_config::BondVarConfig;
use bondvar_core::{Date, MissingPolicy};
use bondvar_ext_file::{CsvSeriesSource, HistoricalDataSource};
use bondvar_portfolio::Portfolio;
use bondvar_traits::SeriesSource;

use crate::cli::{InputArgs, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and notices.
    pub quiet: bool,
    /// Config and data locations.
    pub input: InputArgs,
}

impl Context {
    /// The `--config` file, or the standard basket.
    pub fn load_config(&self) -> Result<BondVarConfig> {
        match &self.input.config {
            Some(path) => Ok(BondVarConfig::load_from_path(path)?),
            None => Ok(BondVarConfig::standard()),
        }
    }

    /// Opens the series source named by `--data` or `--storage`.
    pub fn open_source(&self) -> CliResult<Box<dyn SeriesSource>> {
        if let Some(path) = &self.input.data {
            let source = CsvSeriesSource::new(path).map_err(|e| CliError::DataSource {
                path: path.clone(),
                message: e.to_string(),
            })?;
            return Ok(Box::new(source));
        }
        if let Some(dir) = &self.input.storage {
            let source = HistoricalDataSource::from_dir(dir).map_err(|e| CliError::DataSource {
                path: dir.clone(),
                message: e.to_string(),
            })?;
            return Ok(Box::new(source));
        }
        Err(CliError::NoDataSource)
    }

    /// Builds the configured portfolio and hydrates it.
    ///
    /// Fetch failures are reported on stderr; the analysis continues with
    /// what was fetched.
    pub fn hydrated_portfolio(&self, config: &BondVarConfig) -> Result<Portfolio> {
        let source = self.open_source()?;
        let mut portfolio = config.build_portfolio()?;
        let report = portfolio.hydrate(source.as_ref());
        for failure in &report.failures {
            print_warning(&format!("Could not load {failure}"));
        }
        Ok(portfolio)
    }

    /// Returns true if section headers should be printed.
    pub fn show_headers(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}

/// Command-line overrides of the configured window and engine settings.
#[derive(Args, Debug, Clone, Default)]
pub struct RiskOverrides {
    /// Window start (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Monte Carlo draws
    #[arg(long)]
    pub paths: Option<usize>,

    /// Monte Carlo seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip missing contributions instead of propagating them
    #[arg(long)]
    pub skip_missing: bool,
}

impl RiskOverrides {
    /// Applies the overrides to `config`.
    pub fn apply(&self, config: &mut BondVarConfig) -> CliResult<()> {
        if let Some(start) = &self.start {
            config.portfolio.start_date = Some(parse_date(start)?);
        }
        if let Some(end) = &self.end {
            config.portfolio.end_date = Some(parse_date(end)?);
        }
        if let Some(paths) = self.paths {
            if paths == 0 {
                return Err(CliError::InvalidArgument(
                    "--paths must be positive".to_string(),
                ));
            }
            config.risk.monte_carlo_paths = paths;
        }
        if let Some(seed) = self.seed {
            config.risk.monte_carlo_seed = seed;
        }
        if self.skip_missing {
            config.risk.missing_policy = MissingPolicy::SkipMissing;
        }
        Ok(())
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidArgument(format!("invalid date '{s}', use YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = BondVarConfig::standard();
        let overrides = RiskOverrides {
            start: Some("2024-01-01".to_string()),
            paths: Some(500),
            skip_missing: true,
            ..RiskOverrides::default()
        };
        overrides.apply(&mut config).unwrap();
        assert_eq!(config.risk.monte_carlo_paths, 500);
        assert_eq!(config.risk.missing_policy, MissingPolicy::SkipMissing);
        assert_eq!(
            config.portfolio.start_date,
            Some(Date::from_ymd(2024, 1, 1).unwrap())
        );

        let zero = RiskOverrides {
            paths: Some(0),
            ..RiskOverrides::default()
        };
        assert!(zero.apply(&mut config).is_err());
    }

    #[test]
    fn test_no_data_source() {
        let ctx = Context {
            format: OutputFormat::Table,
            quiet: false,
            input: InputArgs::default(),
        };
        assert!(matches!(ctx.open_source(), Err(CliError::NoDataSource)));
    }
}
