//! In-memory series source.

use std::collections::HashMap;

use bondvar_core::{Date, SeriesId, TimeSeries};
use bondvar_traits::{SeriesSource, SourceType, TraitError};

/// Series held in memory, keyed by id.
///
/// An id that was never inserted is `TraitError::NotFound`, which makes
/// this source convenient for exercising partial hydration.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesSource {
    series: HashMap<SeriesId, TimeSeries>,
}

impl InMemorySeriesSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series (builder style).
    #[must_use]
    pub fn with_series(mut self, id: impl Into<SeriesId>, series: TimeSeries) -> Self {
        self.insert(id, series);
        self
    }

    /// Adds or replaces a series.
    pub fn insert(&mut self, id: impl Into<SeriesId>, series: TimeSeries) {
        self.series.insert(id.into(), series);
    }

    /// Number of series held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if no series are held.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesSource for InMemorySeriesSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    fn get_series(&self, id: &SeriesId, start: Date, end: Date) -> Result<TimeSeries, TraitError> {
        self.series
            .get(id)
            .map(|s| s.between(start, end))
            .ok_or_else(|| TraitError::NotFound(id.to_string()))
    }
}
