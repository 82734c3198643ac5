//! Error types for the core data model.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core data-model operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A requested column is not present in the combined table.
    #[error("Missing column {column} for instrument '{instrument}'")]
    MissingColumn {
        /// Instrument group that was looked up.
        instrument: String,
        /// Column within the group.
        column: String,
    },

    /// Two column groups share a name.
    #[error("Duplicate instrument '{name}' in combined table")]
    DuplicateInstrument {
        /// The repeated instrument name.
        name: String,
    },

    /// A column does not line up with the table's date index.
    #[error("Column length {actual} does not match table length {expected}")]
    LengthMismatch {
        /// Number of dates in the table.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(instrument: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            instrument: instrument.into(),
            column: column.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::missing_column("AAA", "dv01");
        assert!(err.to_string().contains("AAA"));
        assert!(err.to_string().contains("dv01"));
    }
}
