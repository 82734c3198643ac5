//! # BondVar Ext File
//!
//! File-based series sources for the BondVar analytics workspace.
//!
//! This crate provides default implementations for EOD loads and tests:
//! - [`CsvSeriesSource`]: long-format `series_id,date,value` CSV
//! - [`HistoricalDataSource`]: CSV exports of the `securities` and
//!   `historical_data` storage tables
//! - [`InMemorySeriesSource`]: series assembled in code
//!
//! For live economic data, implement [`bondvar_traits::SeriesSource`]
//! against the provider's API.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_series;
mod historical;
mod memory;

pub use csv_series::*;
pub use historical::*;
pub use memory::*;

use bondvar_traits::TraitError;

/// Parses a nullable numeric cell. Empty, `NULL`, `.` and `NaN` cells are
/// missing observations.
pub(crate) fn parse_value(raw: Option<&str>) -> Result<Option<f64>, TraitError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() || raw == "." || raw.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| TraitError::ParseError(format!("invalid number: {raw}")))?;
    Ok((!value.is_nan()).then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(Some(" 1.25 ")).unwrap(), Some(1.25));
        assert_eq!(parse_value(Some("")).unwrap(), None);
        assert_eq!(parse_value(Some("NULL")).unwrap(), None);
        assert_eq!(parse_value(Some(".")).unwrap(), None);
        assert_eq!(parse_value(Some("NaN")).unwrap(), None);
        assert_eq!(parse_value(None).unwrap(), None);
        assert!(matches!(parse_value(Some("abc")), Err(TraitError::ParseError(_))));
    }
}
