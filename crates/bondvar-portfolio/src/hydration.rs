//! Outcome of hydrating a portfolio from a series source.

use std::fmt;

use serde::{Deserialize, Serialize};

use bondvar_core::SeriesId;
use bondvar_traits::{SeriesField, TraitError};

/// A series attached during hydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydratedSeries {
    /// Instrument name.
    pub instrument: String,
    /// Fetched series id.
    pub series_id: SeriesId,
    /// Which series of the instrument.
    pub field: SeriesField,
    /// Number of observations received.
    pub observations: usize,
}

/// A fetch that failed. The instrument keeps an absent series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationFailure {
    /// Instrument name.
    pub instrument: String,
    /// Requested series id.
    pub series_id: SeriesId,
    /// Which series of the instrument.
    pub field: SeriesField,
    /// The source's error.
    pub error: TraitError,
}

impl fmt::Display for HydrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}): {}",
            self.instrument, self.field, self.series_id, self.error
        )
    }
}

/// What `Portfolio::hydrate` did, per instrument and field.
///
/// Hydration never fails as a whole; callers use [`Self::is_complete`] to
/// decide whether partial data is acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialHydrationReport {
    /// Series fetched and attached by this call.
    pub fetched: Vec<HydratedSeries>,
    /// Series that were already attached and not re-fetched.
    pub already_present: usize,
    /// Fetches that failed.
    pub failures: Vec<HydrationFailure>,
}

impl PartialHydrationReport {
    /// Returns true if no fetch failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if this call attached any data.
    pub fn attached_any(&self) -> bool {
        !self.fetched.is_empty()
    }

    /// Names of instruments with at least one failed fetch, in order.
    pub fn failed_instruments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for failure in &self.failures {
            if !names.contains(&failure.instrument.as_str()) {
                names.push(&failure.instrument);
            }
        }
        names
    }
}
