//! Shape of the portfolio return distribution.

use std::fmt;

use serde::{Deserialize, Serialize};

use bondvar_core::CombinedTable;
use bondvar_math::statistics::Moments;

use crate::error::{RiskError, RiskResult};

/// Summary statistics of `total_weighted_return`, as annotated on the
/// return histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnDistribution {
    /// Number of present returns.
    pub observations: usize,
    /// Mean daily return.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Biased skewness.
    pub skewness: f64,
    /// Fisher (excess) kurtosis.
    pub excess_kurtosis: f64,
    /// Worst daily return.
    pub min: f64,
    /// Best daily return.
    pub max: f64,
}

impl ReturnDistribution {
    /// Describes a return sample.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` for an empty sample.
    pub fn from_returns(returns: &[f64]) -> RiskResult<Self> {
        let m = Moments::from_sample(returns)
            .map_err(|_| RiskError::insufficient_data("no returns to describe"))?;
        Ok(Self {
            observations: m.count,
            mean: m.mean,
            std_dev: m.std_dev,
            skewness: m.skewness,
            excess_kurtosis: m.excess_kurtosis,
            min: m.min,
            max: m.max,
        })
    }

    /// Describes the table's present `total_weighted_return` rows.
    pub fn from_table(table: &CombinedTable) -> RiskResult<Self> {
        let distribution = Self::from_returns(&table.complete_total_weighted_returns())?;
        tracing::info!(
            skew = distribution.skewness,
            kurtosis = distribution.excess_kurtosis,
            observations = distribution.observations,
            "return distribution"
        );
        Ok(distribution)
    }
}

impl fmt::Display for ReturnDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:.6} std={:.6} skew={:.4} kurt={:.4}",
            self.observations, self.mean, self.std_dev, self.skewness, self.excess_kurtosis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_returns() {
        let d = ReturnDistribution::from_returns(&[-0.02, -0.01, 0.0, 0.01, 0.02]).unwrap();
        assert_eq!(d.observations, 5);
        assert_relative_eq!(d.mean, 0.0, epsilon = 1e-15);
        assert_relative_eq!(d.std_dev, 0.02_f64.sqrt() / 10.0, epsilon = 1e-12);
        assert_relative_eq!(d.skewness, 0.0, epsilon = 1e-9);
        assert_relative_eq!(d.excess_kurtosis, -1.3, epsilon = 1e-9);
        assert_eq!(d.min, -0.02);
        assert_eq!(d.max, 0.02);
    }

    #[test]
    fn test_empty_sample() {
        assert!(matches!(
            ReturnDistribution::from_returns(&[]),
            Err(RiskError::InsufficientData(_))
        ));
    }
}
