//! Error types for risk calculations.

use thiserror::Error;

use bondvar_core::CoreError;
use bondvar_math::MathError;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// A numeric argument is out of range (confidence level, path count).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The VaR method selector is not recognized.
    #[error("unsupported VaR method: {0:?}")]
    UnsupportedMethod(String),

    /// Not enough usable observations for the calculation.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The combined table is missing a column or is misaligned.
    #[error("table error: {0}")]
    Table(#[from] CoreError),

    /// Statistical routine failed.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

impl RiskError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }
}
