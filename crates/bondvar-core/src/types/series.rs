//! Series identifiers and date-keyed observations.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Date;

/// Identifier of an external series (for example a FRED code such as
/// `BAMLC0A1CAAAEY`).
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub String);

impl SeriesId {
    /// Create a new series ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SeriesId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Ordered date-keyed observations of a single series.
///
/// Iteration is always ascending by date. Inserting an existing date
/// replaces the previous value. Missing observations are simply absent;
/// there is no dense calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: BTreeMap<Date, f64>,
}

impl TimeSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an observation, returning the value it replaced.
    pub fn insert(&mut self, date: Date, value: f64) -> Option<f64> {
        self.points.insert(date, value)
    }

    /// Returns the observation on `date`, if any.
    pub fn get(&self, date: Date) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First observation date.
    pub fn first_date(&self) -> Option<Date> {
        self.points.keys().next().copied()
    }

    /// Last observation date.
    pub fn last_date(&self) -> Option<Date> {
        self.points.keys().next_back().copied()
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.keys().copied()
    }

    /// `(date, value)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.points.iter().map(|(d, v)| (*d, *v))
    }

    /// Returns the sub-series within `[start, end]`, both inclusive.
    #[must_use]
    pub fn between(&self, start: Date, end: Date) -> Self {
        if start > end {
            return Self::new();
        }
        self.points
            .range(start..=end)
            .map(|(d, v)| (*d, *v))
            .collect()
    }
}

impl FromIterator<(Date, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (Date, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Date, f64)> for TimeSeries {
    fn extend<I: IntoIterator<Item = (Date, f64)>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
