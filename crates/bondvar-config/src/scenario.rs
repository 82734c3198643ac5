//! Weighting scenario configuration.

use serde::{Deserialize, Serialize};

use bondvar_portfolio::WeightingScenario;

use crate::error::{Validate, ValidationError};

/// A named weight vector applied to the configured basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario name.
    pub name: String,
    /// One weight per instrument, in portfolio order.
    pub weights: Vec<f64>,
}

impl ScenarioConfig {
    /// Creates a scenario configuration.
    pub fn new(name: impl Into<String>, weights: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    /// The runtime scenario.
    pub fn to_scenario(&self) -> WeightingScenario {
        WeightingScenario::new(self.name.as_str(), self.weights.clone())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }
        if self.weights.is_empty() {
            errors.push(ValidationError::with_rule(
                "weights",
                "At least one weight is required",
                "non_empty_weights",
            ));
        }
        if self.weights.iter().any(|w| !w.is_finite()) {
            errors.push(ValidationError::with_rule(
                "weights",
                "Weights must be finite",
                "finite_weight",
            ));
        }

        errors
    }
}
