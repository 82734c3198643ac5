//! Bond-index instruments.

use serde::{Deserialize, Serialize};

use bondvar_core::{SeriesId, TimeSeries};
use bondvar_traits::SeriesField;

/// A weighted bond index with its yield and price series.
///
/// Identity (name, series ids) is fixed at construction. The two series
/// start absent and are attached at most once each; see
/// [`BondIndex::attach`].
///
/// # Example
///
/// ```rust
/// use bondvar_portfolio::BondIndex;
/// use bondvar_traits::SeriesField;
///
/// let aaa = BondIndex::new("AAA", "BAMLC0A1CAAAEY", "BAMLCC0A1AAATRIV", 0.25);
/// assert!(!aaa.is_hydrated());
/// assert_eq!(aaa.series_id(SeriesField::Price).as_str(), "BAMLCC0A1AAATRIV");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondIndex {
    name: String,
    yield_series_id: SeriesId,
    price_series_id: SeriesId,
    weight: f64,
    yield_series: Option<TimeSeries>,
    price_series: Option<TimeSeries>,
}

impl BondIndex {
    /// Creates an instrument with no series attached.
    pub fn new(
        name: impl Into<String>,
        yield_series_id: impl Into<SeriesId>,
        price_series_id: impl Into<SeriesId>,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            yield_series_id: yield_series_id.into(),
            price_series_id: price_series_id.into(),
            weight,
            yield_series: None,
            price_series: None,
        }
    }

    /// Attaches a yield series (builder style).
    #[must_use]
    pub fn with_yield_series(mut self, series: TimeSeries) -> Self {
        self.attach(SeriesField::Yield, series);
        self
    }

    /// Attaches a price series (builder style).
    #[must_use]
    pub fn with_price_series(mut self, series: TimeSeries) -> Self {
        self.attach(SeriesField::Price, series);
        self
    }

    /// Instrument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Portfolio weight. Weights need not sum to one.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Replaces the weight.
    ///
    /// A portfolio does not notice this on its own; call
    /// `Portfolio::invalidate` afterwards.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Series id for `field`.
    pub fn series_id(&self, field: SeriesField) -> &SeriesId {
        match field {
            SeriesField::Yield => &self.yield_series_id,
            SeriesField::Price => &self.price_series_id,
        }
    }

    /// Attached series for `field`, if any.
    pub fn series(&self, field: SeriesField) -> Option<&TimeSeries> {
        match field {
            SeriesField::Yield => self.yield_series.as_ref(),
            SeriesField::Price => self.price_series.as_ref(),
        }
    }

    /// The yield series, if attached.
    pub fn yield_series(&self) -> Option<&TimeSeries> {
        self.yield_series.as_ref()
    }

    /// The price series, if attached.
    pub fn price_series(&self) -> Option<&TimeSeries> {
        self.price_series.as_ref()
    }

    /// Attaches `series` unless one is already present.
    ///
    /// Returns `true` if the series was attached.
    pub fn attach(&mut self, field: SeriesField, series: TimeSeries) -> bool {
        let slot = match field {
            SeriesField::Yield => &mut self.yield_series,
            SeriesField::Price => &mut self.price_series,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(series);
        true
    }

    /// Returns true if both series are attached.
    pub fn is_hydrated(&self) -> bool {
        self.yield_series.is_some() && self.price_series.is_some()
    }
}
