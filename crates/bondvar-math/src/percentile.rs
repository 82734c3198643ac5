//! Percentile estimators.
//!
//! Both estimators take the sample as `&mut [f64]` and partially reorder it
//! with `select_nth_unstable_by`, so a million-point Monte Carlo sample is
//! never fully sorted or copied. Values are ordered with `f64::total_cmp`;
//! callers are expected to have removed missing observations already.

use crate::error::{MathError, MathResult};

/// Rule for turning a percentile rank into a sample value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PercentileMethod {
    /// Lower order statistic at rank `floor(n · q / 100)`, no interpolation.
    Lower,
    /// Linear interpolation at virtual index `(n - 1) · q / 100`.
    Linear,
}

impl PercentileMethod {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Linear => "linear",
        }
    }
}

/// Computes the `q`-th percentile (`q` in `[0, 100]`) with `method`.
pub fn percentile(values: &mut [f64], q: f64, method: PercentileMethod) -> MathResult<f64> {
    match method {
        PercentileMethod::Lower => percentile_lower(values, q),
        PercentileMethod::Linear => percentile_linear(values, q),
    }
}

/// The "lower" percentile: the order statistic at 0-based rank
/// `floor(n · q / 100)`, clamped to `n - 1`.
///
/// When the rank falls between two observations the lower one is returned,
/// never an interpolated value.
///
/// # Example
///
/// ```rust
/// use bondvar_math::percentile::percentile_lower;
///
/// let mut returns = [0.02, -0.01, 0.0, -0.02, 0.01];
/// assert_eq!(percentile_lower(&mut returns, 20.0).unwrap(), -0.01);
/// ```
pub fn percentile_lower(values: &mut [f64], q: f64) -> MathResult<f64> {
    validate(values, q)?;
    let n = values.len();
    // q * n first: exact for integral q, so an integral rank never floors down
    let rank = (q * n as f64 / 100.0).floor() as usize;
    let k = rank.min(n - 1);
    let (_, kth, _) = values.select_nth_unstable_by(k, f64::total_cmp);
    Ok(*kth)
}

/// Linearly interpolated percentile, matching numpy's default `linear`
/// method: virtual index `h = (n - 1) · q / 100`, result
/// `x[floor(h)] + (h - floor(h)) · (x[floor(h) + 1] - x[floor(h)])`.
pub fn percentile_linear(values: &mut [f64], q: f64) -> MathResult<f64> {
    validate(values, q)?;
    let n = values.len();
    let h = (n - 1) as f64 * q / 100.0;
    let lo = (h.floor() as usize).min(n - 1);
    let t = h - lo as f64;

    let (_, below, upper) = values.select_nth_unstable_by(lo, f64::total_cmp);
    let a = *below;
    if t <= 0.0 {
        return Ok(a);
    }
    match upper.iter().copied().min_by(f64::total_cmp) {
        Some(b) => Ok(lerp(a, b, t)),
        None => Ok(a),
    }
}

/// Interpolates between `a` and `b`, anchored on the nearer endpoint.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t < 0.5 {
        a + diff * t
    } else {
        b - diff * (1.0 - t)
    }
}

fn validate(values: &[f64], q: f64) -> MathResult<()> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(MathError::InvalidPercentile { value: q });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_lower_worked_example() {
        let mut returns = vec![-0.02, -0.01, 0.00, 0.01, 0.02];
        assert_eq!(percentile_lower(&mut returns, 20.0).unwrap(), -0.01);
    }

    #[test]
    fn test_lower_never_interpolates() {
        let mut values = vec![4.0, 1.0, 3.0, 2.0];
        // rank floor(4 * 0.3) = 1
        assert_eq!(percentile_lower(&mut values, 30.0).unwrap(), 2.0);
        // rank floor(4 * 0.6) = 2
        assert_eq!(percentile_lower(&mut values, 60.0).unwrap(), 3.0);
    }

    #[test]
    fn test_lower_extremes() {
        let mut values = vec![3.0, -1.0, 7.0];
        assert_eq!(percentile_lower(&mut values, 0.0).unwrap(), -1.0);
        assert_eq!(percentile_lower(&mut values, 100.0).unwrap(), 7.0);
    }

    #[test]
    fn test_linear_matches_numpy() {
        // numpy.percentile([1, 2, 3, 4], 40) == 2.2
        let mut values = vec![4.0, 2.0, 1.0, 3.0];
        assert_relative_eq!(percentile_linear(&mut values, 40.0).unwrap(), 2.2, epsilon = 1e-12);

        // numpy.percentile([10, 20, 30, 40, 50], 90) == 46.0
        let mut values = vec![50.0, 10.0, 40.0, 20.0, 30.0];
        assert_relative_eq!(percentile_linear(&mut values, 90.0).unwrap(), 46.0, epsilon = 1e-12);

        let mut values = vec![5.0, 1.0];
        assert_eq!(percentile_linear(&mut values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile_linear(&mut values, 100.0).unwrap(), 5.0);
    }

    #[test]
    fn test_single_observation() {
        let mut values = vec![0.5];
        assert_eq!(percentile_lower(&mut values, 1.0).unwrap(), 0.5);
        assert_eq!(percentile_linear(&mut values, 99.0).unwrap(), 0.5);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut empty: Vec<f64> = vec![];
        assert!(matches!(
            percentile_lower(&mut empty, 50.0),
            Err(MathError::InsufficientData { .. })
        ));

        let mut values = vec![1.0, 2.0];
        assert!(matches!(
            percentile_linear(&mut values, 100.5),
            Err(MathError::InvalidPercentile { .. })
        ));
        assert!(matches!(
            percentile(&mut values, f64::NAN, PercentileMethod::Lower),
            Err(MathError::InvalidPercentile { .. })
        ));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(PercentileMethod::Lower.as_str(), "lower");
        assert_eq!(PercentileMethod::Linear.as_str(), "linear");
    }

    proptest! {
        #[test]
        fn prop_percentiles_are_bounded(
            values in prop::collection::vec(-1.0f64..1.0, 1..200),
            q in 0.0f64..=100.0,
        ) {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            let lower = percentile_lower(&mut values.clone(), q).unwrap();
            let linear = percentile_linear(&mut values.clone(), q).unwrap();

            prop_assert!(lower >= min && lower <= max);
            prop_assert!(linear >= min - 1e-12 && linear <= max + 1e-12);
            // the lower estimator is always an actual observation
            prop_assert!(values.contains(&lower));
        }
    }
}
