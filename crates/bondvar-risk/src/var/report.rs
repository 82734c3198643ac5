//! VaR over several confidence levels and methods.

use serde::{Deserialize, Serialize};

use bondvar_core::CombinedTable;

use super::{calc_var, MonteCarloSettings, VarMethod, VarResult};
use crate::error::RiskResult;

/// Standard confidence levels, in percent.
pub const STANDARD_CONFIDENCE_LEVELS: [f64; 2] = [99.0, 95.0];

/// VaR results for every requested `(method, confidence)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarReport {
    /// Results ordered by method, then by confidence as requested.
    pub results: Vec<VarResult>,
}

impl VarReport {
    /// Computes VaR for each method and confidence level.
    ///
    /// Fails on the first invalid confidence level or empty sample.
    pub fn compute(
        table: &CombinedTable,
        confidence_levels: &[f64],
        methods: &[VarMethod],
        settings: &MonteCarloSettings,
    ) -> RiskResult<Self> {
        let mut results = Vec::with_capacity(confidence_levels.len() * methods.len());
        for &method in methods {
            for &cint in confidence_levels {
                let result = calc_var(table, cint, method, settings)?;
                tracing::info!(%method, cint, value = result.value, "VaR");
                results.push(result);
            }
        }
        Ok(Self { results })
    }

    /// Looks up a result.
    pub fn get(&self, method: VarMethod, confidence: f64) -> Option<&VarResult> {
        self.results
            .iter()
            .find(|r| r.method == method && r.confidence == confidence)
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if the report holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
