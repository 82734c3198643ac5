//! Value at Risk (VaR) calculations.
//!
//! VaR is reported as a signed return: the `(100 - cint)`-th percentile of
//! the portfolio's daily `total_weighted_return`. A 95% VaR of `-0.012`
//! means a daily loss worse than 1.2% is expected on 5% of days.

mod historical;
mod monte_carlo;
mod report;

pub use historical::*;
pub use monte_carlo::*;
pub use report::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bondvar_core::CombinedTable;

use crate::error::{RiskError, RiskResult};

/// VaR calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarMethod {
    /// Empirical percentile of observed returns, lower order statistic.
    Historical,
    /// Percentile of seeded normal draws fitted to observed returns.
    MonteCarlo,
}

impl VarMethod {
    /// Both methods, in report order.
    pub const ALL: [VarMethod; 2] = [VarMethod::Historical, VarMethod::MonteCarlo];

    /// Returns the method selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::MonteCarlo => "monte_carlo",
        }
    }
}

impl fmt::Display for VarMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VarMethod {
    type Err = RiskError;

    /// Parses a selector case-insensitively; `-`, `_` and spaces are
    /// interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "historical" | "hist" => Ok(Self::Historical),
            "montecarlo" | "mc" => Ok(Self::MonteCarlo),
            _ => Err(RiskError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Checks that `cint` is a percentage in `[0, 100]`.
///
/// # Errors
///
/// Returns `RiskError::InvalidParameter` otherwise, including for `NaN`.
pub fn validate_confidence(cint: f64) -> RiskResult<()> {
    if (0.0..=100.0).contains(&cint) {
        Ok(())
    } else {
        Err(RiskError::invalid_parameter(format!(
            "confidence {cint} is outside [0, 100]"
        )))
    }
}

/// Structured VaR result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarResult {
    /// Signed threshold return.
    pub value: f64,
    /// Confidence level in percent.
    pub confidence: f64,
    /// Method used.
    pub method: VarMethod,
    /// Number of observed returns the estimate is based on.
    pub observations: usize,
}

impl fmt::Display for VarResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VaR({}%, {}): {:.4}%",
            self.confidence,
            self.method,
            self.value * 100.0
        )
    }
}

/// Computes VaR of the table's present `total_weighted_return` rows.
///
/// `cint` is validated before anything else.
pub fn calc_var(
    table: &CombinedTable,
    cint: f64,
    method: VarMethod,
    settings: &MonteCarloSettings,
) -> RiskResult<VarResult> {
    validate_confidence(cint)?;
    let returns = table.complete_total_weighted_returns();
    tracing::debug!(
        %method,
        cint,
        observations = returns.len(),
        missing = table.len() - returns.len(),
        "calculating VaR"
    );

    let value = match method {
        VarMethod::Historical => historical_var(&returns, cint)?,
        VarMethod::MonteCarlo => monte_carlo_var(&returns, cint, settings)?,
    };
    Ok(VarResult {
        value,
        confidence: cint,
        method,
        observations: returns.len(),
    })
}

pub(crate) fn require_returns(returns: &[f64]) -> RiskResult<()> {
    if returns.is_empty() {
        return Err(RiskError::insufficient_data(
            "no complete total_weighted_return rows",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondvar_core::{Date, InstrumentColumns, InstrumentRow, MissingPolicy};

    fn table(returns: &[Option<f64>]) -> CombinedTable {
        let dates: Vec<Date> = (0..returns.len())
            .map(|i| Date::from_ymd(2024, 1, 1).unwrap().add_days(i as i64))
            .collect();
        let rows = returns
            .iter()
            .map(|r| {
                Some(InstrumentRow {
                    weighted_return: *r,
                    ..InstrumentRow::default()
                })
            })
            .collect();
        let group = InstrumentColumns::new("A", 1.0, rows);
        CombinedTable::new(dates, vec![group], MissingPolicy::Propagate).unwrap()
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("historical".parse::<VarMethod>().unwrap(), VarMethod::Historical);
        assert_eq!("HISTORICAL".parse::<VarMethod>().unwrap(), VarMethod::Historical);
        assert_eq!("monte_carlo".parse::<VarMethod>().unwrap(), VarMethod::MonteCarlo);
        assert_eq!("Monte-Carlo".parse::<VarMethod>().unwrap(), VarMethod::MonteCarlo);
        assert_eq!("mc".parse::<VarMethod>().unwrap(), VarMethod::MonteCarlo);

        for bad in ["parametric", "", "montecarlo2"] {
            assert!(matches!(
                bad.parse::<VarMethod>(),
                Err(RiskError::UnsupportedMethod(s)) if s == bad
            ));
        }
    }

    #[test]
    fn test_method_display_round_trips() {
        for method in VarMethod::ALL {
            assert_eq!(method.to_string().parse::<VarMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_validate_confidence() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(100.0).is_ok());
        for bad in [-0.1, 100.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_confidence(bad),
                Err(RiskError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_calc_var_skips_missing_rows() {
        let t = table(&[None, Some(-0.02), Some(-0.01), None, Some(0.0), Some(0.01), Some(0.02)]);
        let result =
            calc_var(&t, 80.0, VarMethod::Historical, &MonteCarloSettings::default()).unwrap();
        assert_eq!(result.value, -0.01);
        assert_eq!(result.observations, 5);
        assert_eq!(result.method, VarMethod::Historical);
    }

    #[test]
    fn test_calc_var_validates_before_data() {
        let empty = table(&[None, None]);
        assert!(matches!(
            calc_var(&empty, 150.0, VarMethod::Historical, &MonteCarloSettings::default()),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            calc_var(&empty, 95.0, VarMethod::MonteCarlo, &MonteCarloSettings::default()),
            Err(RiskError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_result_display() {
        let result = VarResult {
            value: -0.0125,
            confidence: 95.0,
            method: VarMethod::Historical,
            observations: 250,
        };
        assert_eq!(result.to_string(), "VaR(95%, historical): -1.2500%");
    }
}
