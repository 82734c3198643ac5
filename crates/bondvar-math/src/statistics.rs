//! Sample moments.
//!
//! Standard deviations are population (divide by `n`) throughout. Skewness
//! is the biased moment ratio and kurtosis is reported in excess of the
//! normal distribution's 3.

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

/// Arithmetic mean. `NaN` for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Population standard deviation (`ddof = 0`). `NaN` for an empty sample.
pub fn population_std_dev(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}

/// Biased sample skewness `m3 / m2^1.5`. `NaN` when the sample is empty
/// or has zero variance.
pub fn skewness(values: &[f64]) -> f64 {
    let (m2, m3, _) = central_moments(values);
    m3 / m2.powf(1.5)
}

/// Excess kurtosis `m4 / m2² - 3`. `NaN` when the sample is empty or has
/// zero variance.
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let (m2, _, m4) = central_moments(values);
    m4 / (m2 * m2) - 3.0
}

fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mu = mean(values);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in values {
        let d = x - mu;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    if m2 == 0.0 {
        return (0.0, f64::NAN, f64::NAN);
    }
    (m2 / n, m3 / n, m4 / n)
}

/// Summary of a sample's shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Biased skewness.
    pub skewness: f64,
    /// Excess kurtosis.
    pub excess_kurtosis: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

impl Moments {
    /// Computes all moments of `values` in one call.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientData` for an empty sample.
    pub fn from_sample(values: &[f64]) -> MathResult<Self> {
        if values.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        Ok(Self {
            count: values.len(),
            mean: mean(values),
            std_dev: population_std_dev(values),
            skewness: skewness(values),
            excess_kurtosis: excess_kurtosis(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
