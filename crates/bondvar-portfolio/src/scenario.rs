//! Weighting scenarios.
//!
//! A scenario reruns the full analysis of a hydrated portfolio under a
//! different weight vector. The series are shared; only the weights (and so
//! the derived columns) change.

use serde::{Deserialize, Serialize};

use bondvar_risk::distribution::ReturnDistribution;
use bondvar_risk::dv01::Dv01Summary;
use bondvar_risk::var::VarReport;

use crate::{Portfolio, PortfolioResult};

/// A named weight vector, one weight per portfolio instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingScenario {
    /// Scenario name, used as the reweighted portfolio's name.
    pub name: String,
    /// Weights in portfolio instrument order.
    pub weights: Vec<f64>,
}

impl WeightingScenario {
    /// Creates a new scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, weights: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    /// Sum of the weights. Not required to be one.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Analysis of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Weights applied.
    pub weights: Vec<f64>,
    /// VaR for every requested confidence level and both methods.
    pub var: VarReport,
    /// Moments of the reweighted return series.
    pub distribution: ReturnDistribution,
    /// Displayable DV01 rows.
    pub dv01: Dv01Summary,
}

impl ScenarioOutcome {
    /// Runs the analysis on an already reweighted portfolio.
    pub fn evaluate(portfolio: &mut Portfolio, confidence_levels: &[f64]) -> PortfolioResult<Self> {
        let var = portfolio.var_report(confidence_levels)?;
        let distribution = portfolio.return_distribution()?;
        let dv01 = portfolio.dv01_summary()?;
        Ok(Self {
            name: portfolio.name().to_string(),
            weights: portfolio.instruments().iter().map(|i| i.weight()).collect(),
            var,
            distribution,
            dv01,
        })
    }
}

/// Runs each scenario against `base` in order.
///
/// `base` is not modified. Stops at the first scenario that fails.
pub fn run_scenarios(
    base: &Portfolio,
    scenarios: &[WeightingScenario],
    confidence_levels: &[f64],
) -> PortfolioResult<Vec<ScenarioOutcome>> {
    let _enter = base.span().enter();
    scenarios
        .iter()
        .map(|scenario| {
            tracing::info!(scenario = %scenario.name, weights = ?scenario.weights, "running scenario");
            let mut portfolio = base.with_weights(&scenario.name, &scenario.weights)?;
            ScenarioOutcome::evaluate(&mut portfolio, confidence_levels)
        })
        .collect()
}
