//! Risk engine configuration.

use serde::{Deserialize, Serialize};

use bondvar_core::MissingPolicy;
use bondvar_portfolio::RiskSettings;
use bondvar_risk::var::{
    MonteCarloSettings, STANDARD_CONFIDENCE_LEVELS, DEFAULT_MC_PATHS, DEFAULT_MC_SEED,
};

use crate::error::{Validate, ValidationError};

fn default_confidence_levels() -> Vec<f64> {
    STANDARD_CONFIDENCE_LEVELS.to_vec()
}

fn default_mc_paths() -> usize {
    DEFAULT_MC_PATHS
}

fn default_mc_seed() -> u64 {
    DEFAULT_MC_SEED
}

/// VaR and DV01 settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Confidence levels in percent, reported in this order.
    #[serde(default = "default_confidence_levels")]
    pub confidence_levels: Vec<f64>,

    /// Number of paths for Monte Carlo simulations.
    #[serde(default = "default_mc_paths")]
    pub monte_carlo_paths: usize,

    /// Random seed for reproducibility.
    #[serde(default = "default_mc_seed")]
    pub monte_carlo_seed: u64,

    /// How a missing contribution enters the portfolio aggregates.
    #[serde(default)]
    pub missing_policy: MissingPolicy,

    /// Cover only the first N instruments with DV01.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dv01_instrument_limit: Option<usize>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RiskConfig {
    /// Creates standard risk configuration: 99% and 95%, one million
    /// paths with seed 1, propagating missing values.
    pub fn standard() -> Self {
        Self {
            confidence_levels: default_confidence_levels(),
            monte_carlo_paths: DEFAULT_MC_PATHS,
            monte_carlo_seed: DEFAULT_MC_SEED,
            missing_policy: MissingPolicy::Propagate,
            dv01_instrument_limit: None,
        }
    }

    /// Builder method to set Monte Carlo paths.
    #[must_use]
    pub fn with_monte_carlo_paths(mut self, paths: usize) -> Self {
        self.monte_carlo_paths = paths;
        self
    }

    /// Builder method to set the missing-value policy.
    #[must_use]
    pub fn with_missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing_policy = policy;
        self
    }

    /// Builder method to set the confidence levels.
    #[must_use]
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Engine parameters for a portfolio.
    pub fn to_risk_settings(&self) -> RiskSettings {
        RiskSettings {
            monte_carlo: MonteCarloSettings::new(self.monte_carlo_paths, self.monte_carlo_seed),
            dv01_instrument_limit: self.dv01_instrument_limit,
        }
    }
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.confidence_levels.is_empty() {
            errors.push(ValidationError::with_rule(
                "confidence_levels",
                "At least one confidence level is required",
                "non_empty_levels",
            ));
        }
        for (i, level) in self.confidence_levels.iter().enumerate() {
            if !(0.0..=100.0).contains(level) {
                errors.push(ValidationError::with_rule(
                    format!("confidence_levels[{i}]"),
                    format!("Confidence {level} must be between 0 and 100"),
                    "percent_range",
                ));
            }
        }

        if self.monte_carlo_paths == 0 {
            errors.push(ValidationError::with_rule(
                "monte_carlo_paths",
                "Monte Carlo paths must be positive",
                "valid_mc_paths",
            ));
        }

        if self.dv01_instrument_limit == Some(0) {
            errors.push(ValidationError::with_rule(
                "dv01_instrument_limit",
                "DV01 instrument limit must be positive when set",
                "positive_limit",
            ));
        }

        errors
    }
}
