//! VaR command implementation.
//!
//! Computes portfolio VaR for each confidence level and method.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondvar_risk::var::{validate_confidence, VarMethod, VarResult};

use crate::cli::OutputFormat;
use crate::commands::{Context, RiskOverrides};
use crate::output::{format_percent, print_header, print_json, print_output, KeyValue};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Confidence levels in percent, comma separated. Defaults to the
    /// configured levels (99,95).
    #[arg(short = 'l', long = "confidence", value_delimiter = ',')]
    pub confidence: Vec<f64>,

    /// VaR method: historical, monte-carlo, or all
    #[arg(short, long, default_value = "all")]
    pub method: String,

    #[command(flatten)]
    pub overrides: RiskOverrides,
}

/// VaR result row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
struct VarRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "VaR")]
    var: String,
    #[tabled(rename = "Observations")]
    observations: usize,
}

impl From<&VarResult> for VarRow {
    fn from(result: &VarResult) -> Self {
        Self {
            method: result.method.to_string(),
            confidence: format!("{}%", result.confidence),
            var: format_percent(result.value),
            observations: result.observations,
        }
    }
}

/// Parses `all` or a single method name.
fn parse_methods(method: &str) -> Result<Vec<VarMethod>> {
    if method.eq_ignore_ascii_case("all") {
        return Ok(VarMethod::ALL.to_vec());
    }
    Ok(vec![method.parse()?])
}

/// Execute the var command.
pub fn execute(args: VarArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    args.overrides.apply(&mut config)?;

    let levels = if args.confidence.is_empty() {
        config.risk.confidence_levels.clone()
    } else {
        args.confidence.clone()
    };
    // confidence is checked before the method selector
    for &cint in &levels {
        validate_confidence(cint)?;
    }
    let methods = parse_methods(&args.method)?;

    let mut portfolio = ctx.hydrated_portfolio(&config)?;
    let mut results = Vec::with_capacity(methods.len() * levels.len());
    for &method in &methods {
        for &cint in &levels {
            results.push(portfolio.calc_portfolio_var_result(cint, method)?);
        }
    }

    match ctx.format {
        OutputFormat::Table => {
            if ctx.show_headers() {
                print_header(&format!("Portfolio VaR: {}", portfolio.name()));
            }
            let rows: Vec<VarRow> = results.iter().map(VarRow::from).collect();
            print_output(&rows, ctx.format)?;

            if ctx.show_headers() {
                let distribution = portfolio.return_distribution()?;
                print_header("Return distribution");
                let stats = vec![
                    KeyValue::new("Observations", distribution.observations.to_string()),
                    KeyValue::new("Mean", format_percent(distribution.mean)),
                    KeyValue::new("Std dev", format_percent(distribution.std_dev)),
                    KeyValue::new("Skew", format!("{:.4}", distribution.skewness)),
                    KeyValue::new("Kurtosis", format!("{:.4}", distribution.excess_kurtosis)),
                ];
                print_output(&stats, ctx.format)?;
            }
        }
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Csv => print_output(&results_as_rows(&results), ctx.format)?,
        OutputFormat::Minimal => {
            for result in &results {
                println!("{} {} {}", result.method, result.confidence, result.value);
            }
        }
    }

    Ok(())
}

/// Numeric rows for CSV export.
#[derive(Debug, Clone, Serialize, Tabled)]
struct VarCsvRow {
    method: VarMethod,
    confidence: f64,
    var: f64,
    observations: usize,
}

fn results_as_rows(results: &[VarResult]) -> Vec<VarCsvRow> {
    results
        .iter()
        .map(|r| VarCsvRow {
            method: r.method,
            confidence: r.confidence,
            var: r.value,
            observations: r.observations,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_methods() {
        assert_eq!(parse_methods("all").unwrap(), VarMethod::ALL.to_vec());
        assert_eq!(parse_methods("mc").unwrap(), vec![VarMethod::MonteCarlo]);
        assert!(parse_methods("garch").is_err());
    }
}
