//! Error types for portfolio construction and analytics.

use thiserror::Error;

use bondvar_core::{CoreError, Date};
use bondvar_risk::RiskError;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Empty portfolio.
    #[error("Portfolio has no instruments")]
    EmptyPortfolio,

    /// Two instruments share a name.
    #[error("Duplicate instrument name: {name}")]
    DuplicateInstrument {
        /// The repeated name.
        name: String,
    },

    /// Start date after end date.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Requested start.
        start: Date,
        /// Requested end.
        end: Date,
    },

    /// A weight vector does not match the instrument count.
    #[error("Expected {expected} weights, got {actual}")]
    WeightCountMismatch {
        /// Number of instruments.
        expected: usize,
        /// Number of weights supplied.
        actual: usize,
    },

    /// Invalid weight (NaN or infinite).
    #[error("Invalid weight for instrument '{name}': {value}")]
    InvalidWeight {
        /// The instrument name.
        name: String,
        /// The invalid weight value.
        value: f64,
    },

    /// Risk calculation failed.
    #[error(transparent)]
    Risk(#[from] RiskError),
}

impl PortfolioError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl From<CoreError> for PortfolioError {
    fn from(e: CoreError) -> Self {
        Self::Risk(RiskError::Table(e))
    }
}
