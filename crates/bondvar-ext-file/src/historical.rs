//! Storage-table series source.
//!
//! Reads CSV exports of the two storage tables:
//!
//! ```text
//! securities.csv       id,price_index,yield_index
//! historical_data.csv  id,date,ticker_id,yield,price
//! ```
//!
//! A ticker resolves to the security whose `price_index` or `yield_index`
//! equals it. Each historical row carries both fields for one security on
//! one date; either may be `NULL`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use bondvar_core::{Date, SeriesId, TimeSeries};
use bondvar_traits::{SeriesField, SeriesSource, SourceType, TraitError};

use crate::parse_value;

/// File name of the securities export inside a data directory.
pub const SECURITIES_FILE: &str = "securities.csv";

/// File name of the historical data export inside a data directory.
pub const HISTORICAL_DATA_FILE: &str = "historical_data.csv";

#[derive(Debug, Deserialize)]
struct SecurityRecord {
    id: Uuid,
    price_index: String,
    yield_index: String,
}

#[derive(Debug, Deserialize)]
struct HistoricalRecord {
    date: Date,
    ticker_id: Uuid,
    #[serde(rename = "yield")]
    yield_value: Option<String>,
    price: Option<String>,
}

/// A row of the `securities` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Security {
    /// Primary key.
    pub id: Uuid,
    /// Series id of the total-return index.
    pub price_index: String,
    /// Series id of the effective yield.
    pub yield_index: String,
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    yield_value: Option<f64>,
    price: Option<f64>,
}

/// Series source backed by the storage-table CSV exports.
#[derive(Debug, Clone)]
pub struct HistoricalDataSource {
    securities: Vec<Security>,
    history: HashMap<Uuid, Vec<(Date, Observation)>>,
}

impl HistoricalDataSource {
    /// Loads `securities.csv` and `historical_data.csv` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TraitError> {
        let dir = dir.as_ref();
        Self::new(dir.join(SECURITIES_FILE), dir.join(HISTORICAL_DATA_FILE))
    }

    /// Loads the two table exports.
    pub fn new(
        securities_csv: impl AsRef<Path>,
        historical_csv: impl AsRef<Path>,
    ) -> Result<Self, TraitError> {
        let securities: Vec<Security> = open(securities_csv.as_ref())?
            .deserialize()
            .map(|r| {
                r.map(|s: SecurityRecord| Security {
                    id: s.id,
                    price_index: s.price_index,
                    yield_index: s.yield_index,
                })
                .map_err(|e| TraitError::ParseError(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        let known: HashSet<Uuid> = securities.iter().map(|s| s.id).collect();
        let mut history: HashMap<Uuid, Vec<(Date, Observation)>> = HashMap::new();
        let mut orphans = 0usize;
        for result in open(historical_csv.as_ref())?.deserialize() {
            let record: HistoricalRecord =
                result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            if !known.contains(&record.ticker_id) {
                orphans += 1;
                continue;
            }
            let observation = Observation {
                yield_value: parse_value(record.yield_value.as_deref())?,
                price: parse_value(record.price.as_deref())?,
            };
            history
                .entry(record.ticker_id)
                .or_default()
                .push((record.date, observation));
        }
        if orphans > 0 {
            tracing::warn!(orphans, "historical rows reference unknown securities");
        }

        tracing::debug!(
            securities = securities.len(),
            tickers_with_history = history.len(),
            "loaded storage tables"
        );
        Ok(Self {
            securities,
            history,
        })
    }

    /// All securities.
    pub fn securities(&self) -> &[Security] {
        &self.securities
    }

    /// The security whose price or yield index is `ticker`.
    pub fn find_security(&self, ticker: &str) -> Option<&Security> {
        self.securities
            .iter()
            .find(|s| s.price_index == ticker || s.yield_index == ticker)
    }

    /// Returns `field` of the security identified by `ticker` within
    /// `[start, end]`, ordered by date. `NULL` cells are skipped.
    pub fn query_series(
        &self,
        field: SeriesField,
        ticker: &str,
        start: Date,
        end: Date,
    ) -> Result<TimeSeries, TraitError> {
        let security = self
            .find_security(ticker)
            .ok_or_else(|| TraitError::NotFound(format!("no security for ticker {ticker}")))?;

        let rows = self.history.get(&security.id).map_or(&[][..], Vec::as_slice);
        Ok(rows
            .iter()
            .filter(|(date, _)| *date >= start && *date <= end)
            .filter_map(|(date, obs)| {
                let value = match field {
                    SeriesField::Yield => obs.yield_value,
                    SeriesField::Price => obs.price,
                };
                value.map(|v| (*date, v))
            })
            .collect())
    }
}

impl SeriesSource for HistoricalDataSource {
    fn source_type(&self) -> SourceType {
        SourceType::Database
    }

    /// Resolves the field from which index column `id` matched.
    fn get_series(&self, id: &SeriesId, start: Date, end: Date) -> Result<TimeSeries, TraitError> {
        let field = match self.find_security(id.as_str()) {
            Some(s) if s.price_index == id.as_str() => SeriesField::Price,
            Some(_) => SeriesField::Yield,
            None => return Err(TraitError::NotFound(format!("no security for ticker {id}"))),
        };
        self.query_series(field, id.as_str(), start, end)
    }
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, TraitError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| TraitError::IoError(format!("{}: {e}", path.display())))
}
