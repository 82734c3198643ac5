//! Series source traits.
//!
//! A [`SeriesSource`] answers one question: the observations of a series
//! between two dates, ascending. Sources may return partial or empty
//! series; there is no guarantee of a dense daily calendar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use bondvar_core::{Date, SeriesId, TimeSeries};

/// Source type for series data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// File-based (CSV exports)
    File,
    /// Database (for historical/EOD)
    Database,
    /// Remote economic-data service
    Remote,
    /// Built in memory (tests, manual entry)
    Manual,
}

/// Which of an instrument's two series a fetch is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesField {
    /// Effective yield, in percent.
    Yield,
    /// Total-return index level.
    Price,
}

impl SeriesField {
    /// Returns the field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yield => "yield",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SERIES SOURCE
// =============================================================================

/// Trait for date-keyed series providers.
///
/// Fetches are synchronous and performed one at a time by the caller.
pub trait SeriesSource {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the observations of `id` within `[start, end]`, both inclusive,
    /// in ascending date order.
    fn get_series(&self, id: &SeriesId, start: Date, end: Date)
        -> Result<TimeSeries, TraitError>;
}

impl<S: SeriesSource + ?Sized> SeriesSource for &S {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn get_series(
        &self,
        id: &SeriesId,
        start: Date,
        end: Date,
    ) -> Result<TimeSeries, TraitError> {
        (**self).get_series(id, start, end)
    }
}

impl<S: SeriesSource + ?Sized> SeriesSource for Box<S> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn get_series(
        &self,
        id: &SeriesId,
        start: Date,
        end: Date,
    ) -> Result<TimeSeries, TraitError> {
        (**self).get_series(id, start, end)
    }
}
