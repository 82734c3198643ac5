//! Scenarios command implementation.
//!
//! Reruns the analysis under each configured weighting.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondvar_portfolio::{run_scenarios, ScenarioOutcome};
use bondvar_risk::var::validate_confidence;

use crate::cli::OutputFormat;
use crate::commands::{Context, RiskOverrides};
use crate::error::CliError;
use crate::output::{format_percent, format_value, print_header, print_json, print_output};

/// Arguments for the scenarios command.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Run only the scenarios with these names, comma separated
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    #[command(flatten)]
    pub overrides: RiskOverrides,
}

/// One VaR figure of one scenario.
#[derive(Debug, Clone, Serialize, Tabled)]
struct ScenarioVarRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Confidence")]
    confidence: f64,
    #[tabled(rename = "VaR")]
    var: String,
}

/// Distribution and DV01 overview of one scenario.
#[derive(Debug, Clone, Serialize, Tabled)]
struct ScenarioShapeRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Weights")]
    weights: String,
    #[tabled(rename = "Std dev")]
    std_dev: String,
    #[tabled(rename = "Skew")]
    skew: String,
    #[tabled(rename = "Kurtosis")]
    kurtosis: String,
    #[tabled(rename = "DV01 rows")]
    dv01_rows: usize,
}

fn var_rows(outcomes: &[ScenarioOutcome], percent: bool) -> Vec<ScenarioVarRow> {
    outcomes
        .iter()
        .flat_map(|outcome| {
            outcome.var.results.iter().map(move |r| ScenarioVarRow {
                scenario: outcome.name.clone(),
                method: r.method.to_string(),
                confidence: r.confidence,
                var: if percent {
                    format_percent(r.value)
                } else {
                    r.value.to_string()
                },
            })
        })
        .collect()
}

fn shape_rows(outcomes: &[ScenarioOutcome]) -> Vec<ScenarioShapeRow> {
    outcomes
        .iter()
        .map(|o| ScenarioShapeRow {
            scenario: o.name.clone(),
            weights: o
                .weights
                .iter()
                .map(|w| format!("{w:.2}"))
                .collect::<Vec<_>>()
                .join("/"),
            std_dev: format_percent(o.distribution.std_dev),
            skew: format_value(Some(o.distribution.skewness), 4),
            kurtosis: format_value(Some(o.distribution.excess_kurtosis), 4),
            dv01_rows: o.dv01.rows.len(),
        })
        .collect()
}

/// Execute the scenarios command.
pub fn execute(args: ScenariosArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    args.overrides.apply(&mut config)?;

    let mut scenarios = config.weighting_scenarios();
    if !args.only.is_empty() {
        scenarios.retain(|s| args.only.contains(&s.name));
    }
    if scenarios.is_empty() {
        return Err(CliError::InvalidArgument("no scenarios to run".to_string()).into());
    }
    for &cint in &config.risk.confidence_levels {
        validate_confidence(cint)?;
    }

    let base = ctx.hydrated_portfolio(&config)?;
    let outcomes = run_scenarios(&base, &scenarios, &config.risk.confidence_levels)?;

    match ctx.format {
        OutputFormat::Table => {
            if ctx.show_headers() {
                print_header("Scenario VaR");
            }
            print_output(&var_rows(&outcomes, true), ctx.format)?;
            if ctx.show_headers() {
                print_header("Return distribution and DV01");
                print_output(&shape_rows(&outcomes), ctx.format)?;
            }
        }
        OutputFormat::Json => print_json(&outcomes)?,
        OutputFormat::Csv | OutputFormat::Minimal => {
            print_output(&var_rows(&outcomes, false), ctx.format)?;
        }
    }

    Ok(())
}
