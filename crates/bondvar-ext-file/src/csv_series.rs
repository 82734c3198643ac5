//! Long-format CSV series source.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use bondvar_core::{Date, SeriesId, TimeSeries};
use bondvar_traits::{SeriesSource, SourceType, TraitError};

use crate::parse_value;

/// CSV record format for series observations.
#[derive(Debug, Deserialize)]
struct SeriesRecord {
    series_id: String,
    date: Date,
    value: Option<String>,
}

/// CSV-based series source.
///
/// Expected columns: `series_id,date,value`. Rows may appear in any
/// order; blank or `NULL` values are skipped.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    file_path: PathBuf,
    series: HashMap<SeriesId, TimeSeries>,
}

impl CsvSeriesSource {
    /// Loads a CSV series file.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let mut source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            series: HashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload series from file.
    pub fn reload(&mut self) -> Result<(), TraitError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(format!("{}: {e}", self.file_path.display())))?;

        let mut series: HashMap<SeriesId, TimeSeries> = HashMap::new();
        let mut skipped = 0usize;
        for result in reader.deserialize() {
            let record: SeriesRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let entry = series.entry(SeriesId::new(record.series_id)).or_default();
            match parse_value(record.value.as_deref())? {
                Some(value) => {
                    entry.insert(record.date, value);
                }
                None => skipped += 1,
            }
        }

        tracing::debug!(
            path = %self.file_path.display(),
            series = series.len(),
            skipped,
            "loaded series file"
        );
        self.series = series;
        Ok(())
    }

    /// Ids of all series in the file.
    pub fn series_ids(&self) -> impl Iterator<Item = &SeriesId> + '_ {
        self.series.keys()
    }
}

impl SeriesSource for CsvSeriesSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn get_series(&self, id: &SeriesId, start: Date, end: Date) -> Result<TimeSeries, TraitError> {
        self.series
            .get(id)
            .map(|s| s.between(start, end))
            .ok_or_else(|| TraitError::NotFound(format!("series {id}")))
    }
}
