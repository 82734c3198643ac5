//! Error types for statistical operations.

use thiserror::Error;

/// A specialized Result type for statistical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during statistical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Percentile rank outside `[0, 100]`.
    #[error("Invalid percentile: {value} is outside [0, 100]")]
    InvalidPercentile {
        /// The requested percentile.
        value: f64,
    },

    /// Distribution parameters rejected by the sampler.
    #[error("Invalid distribution: {reason}")]
    InvalidDistribution {
        /// Description of the invalid parameters.
        reason: String,
    },
}

impl MathError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an invalid distribution error.
    #[must_use]
    pub fn invalid_distribution(reason: impl Into<String>) -> Self {
        Self::InvalidDistribution {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::insufficient_data(1, 0);
        assert!(err.to_string().contains("at least 1"));

        let err = MathError::InvalidPercentile { value: 101.0 };
        assert!(err.to_string().contains("101"));
    }
}
