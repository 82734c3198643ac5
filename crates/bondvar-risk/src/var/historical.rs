//! Historical VaR calculation.

use bondvar_math::percentile::percentile_lower;

use super::{require_returns, validate_confidence};
use crate::error::RiskResult;

/// Historical VaR: the `(100 - cint)`-th percentile of `returns` under the
/// "lower" rule.
///
/// The 0-based rank on the ascending sample is `floor(n · (100 - cint) / 100)`
/// clamped to `n - 1`; no interpolation takes place.
///
/// # Arguments
///
/// * `returns` - Observed returns (as decimals, e.g., -0.01 for -1%)
/// * `cint` - Confidence level in percent, `[0, 100]`
///
/// # Example
///
/// ```rust
/// use bondvar_risk::var::historical_var;
///
/// let returns = [-0.02, -0.01, 0.00, 0.01, 0.02];
/// assert_eq!(historical_var(&returns, 80.0).unwrap(), -0.01);
/// ```
pub fn historical_var(returns: &[f64], cint: f64) -> RiskResult<f64> {
    validate_confidence(cint)?;
    require_returns(returns)?;

    let mut sample = returns.to_vec();
    Ok(percentile_lower(&mut sample, 100.0 - cint)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;

    #[test]
    fn test_historical_var_worked_example() {
        let returns = [0.02, -0.01, 0.01, -0.02, 0.00];
        assert_eq!(historical_var(&returns, 80.0).unwrap(), -0.01);
    }

    #[test]
    fn test_historical_var_levels() {
        let returns: Vec<f64> = vec![
            -0.02, -0.015, -0.01, -0.005, 0.0, 0.005, 0.01, 0.015, 0.02, 0.025,
        ];
        // rank floor(10 * 5 / 100) = 0
        assert_eq!(historical_var(&returns, 95.0).unwrap(), -0.02);
        // rank floor(10 * 10 / 100) = 1
        assert_eq!(historical_var(&returns, 90.0).unwrap(), -0.015);
        // cint 0 asks for the 100th percentile
        assert_eq!(historical_var(&returns, 0.0).unwrap(), 0.025);
        assert_eq!(historical_var(&returns, 100.0).unwrap(), -0.02);
    }

    #[test]
    fn test_historical_var_does_not_reorder_input() {
        let returns = vec![0.03, -0.01, 0.02];
        let _ = historical_var(&returns, 50.0).unwrap();
        assert_eq!(returns, vec![0.03, -0.01, 0.02]);
    }

    #[test]
    fn test_historical_var_errors() {
        assert!(matches!(
            historical_var(&[], 95.0),
            Err(RiskError::InsufficientData(_))
        ));
        assert!(matches!(
            historical_var(&[0.01], -5.0),
            Err(RiskError::InvalidParameter(_))
        ));
    }
}
