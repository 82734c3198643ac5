//! The combined, date-aligned metrics table.
//!
//! One row per date in the union of every instrument's yield calendar. Each
//! instrument owns a column group ([`InstrumentColumns`]) whose entries line
//! up with [`CombinedTable::dates`]. Two portfolio-level aggregates,
//! `total_weighted_return` and `total_weighted_px`, are derived on
//! construction according to a [`MissingPolicy`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

// =============================================================================
// MISSING POLICY
// =============================================================================

/// How row-wise aggregates treat a missing per-instrument contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Any missing contribution makes the aggregate missing for that date.
    #[default]
    Propagate,
    /// Missing contributions are skipped; the aggregate is missing only when
    /// every contribution is missing.
    SkipMissing,
}

impl MissingPolicy {
    /// Sums `values` under this policy.
    ///
    /// An empty input is missing under both policies.
    pub fn sum<I>(self, values: I) -> Option<f64>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut total: Option<f64> = None;
        for value in values {
            match (value, self) {
                (Some(v), _) => total = Some(total.unwrap_or(0.0) + v),
                (None, MissingPolicy::Propagate) => return None,
                (None, MissingPolicy::SkipMissing) => {}
            }
        }
        total
    }

    /// Returns the string identifier for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::SkipMissing => "skip_missing",
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// COLUMNS
// =============================================================================

/// A per-instrument column of the combined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Observed yield (percent).
    Yield,
    /// Observed price / total-return index level.
    Price,
    /// `yield[t] - yield[t-1]`.
    DeltaYield,
    /// `price[t] - price[t-1]`.
    PxChg,
    /// `price[t] / price[t-1] - 1`.
    DailyReturn,
    /// Instrument weight, present wherever the instrument has a row.
    Weight,
    /// `daily_return * weight`.
    WeightedReturn,
    /// `price * weight`.
    WeightedPx,
    /// `0.01 * px_chg / delta_yield`, only after DV01 has been computed.
    Dv01,
}

impl Column {
    /// All columns, in display order.
    pub const ALL: [Column; 9] = [
        Column::Yield,
        Column::Price,
        Column::DeltaYield,
        Column::PxChg,
        Column::DailyReturn,
        Column::Weight,
        Column::WeightedReturn,
        Column::WeightedPx,
        Column::Dv01,
    ];

    /// Returns the column name used in tables and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yield => "yield",
            Self::Price => "price",
            Self::DeltaYield => "delta_yield",
            Self::PxChg => "px_chg",
            Self::DailyReturn => "daily_return",
            Self::Weight => "weight",
            Self::WeightedReturn => "weighted_return",
            Self::WeightedPx => "weighted_px",
            Self::Dv01 => "dv01",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metrics for one instrument on one date.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentRow {
    /// Observed yield.
    pub yield_value: Option<f64>,
    /// Observed price (missing when the price series has no such date).
    pub price: Option<f64>,
    /// Change in yield from the previous row of this instrument.
    pub delta_yield: Option<f64>,
    /// Change in price from the previous row of this instrument.
    pub px_chg: Option<f64>,
    /// Simple return from the previous row of this instrument.
    pub daily_return: Option<f64>,
    /// `daily_return * weight`.
    pub weighted_return: Option<f64>,
    /// `price * weight`.
    pub weighted_px: Option<f64>,
}

/// Column group for one instrument, aligned to the table's dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentColumns {
    name: String,
    weight: f64,
    rows: Vec<Option<InstrumentRow>>,
    dv01: Option<Vec<Option<f64>>>,
}

impl InstrumentColumns {
    /// Creates a column group. `rows[i]` is `None` when the instrument has
    /// no observation on the table's `i`-th date.
    pub fn new(name: impl Into<String>, weight: f64, rows: Vec<Option<InstrumentRow>>) -> Self {
        Self {
            name: name.into(),
            weight,
            rows,
            dv01: None,
        }
    }

    /// Instrument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instrument weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Aligned rows.
    pub fn rows(&self) -> &[Option<InstrumentRow>] {
        &self.rows
    }

    /// Number of dates on which this instrument has a row.
    pub fn observation_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    /// The computed DV01 column, if any.
    pub fn dv01(&self) -> Option<&[Option<f64>]> {
        self.dv01.as_deref()
    }

    /// Extracts one column as aligned optional values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingColumn` for [`Column::Dv01`] before DV01
    /// has been computed.
    pub fn column(&self, column: Column) -> CoreResult<Vec<Option<f64>>> {
        if column == Column::Dv01 {
            return self
                .dv01
                .clone()
                .ok_or_else(|| CoreError::missing_column(&self.name, column.as_str()));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.and_then(|r| match column {
                    Column::Yield => r.yield_value,
                    Column::Price => r.price,
                    Column::DeltaYield => r.delta_yield,
                    Column::PxChg => r.px_chg,
                    Column::DailyReturn => r.daily_return,
                    Column::Weight => Some(self.weight),
                    Column::WeightedReturn => r.weighted_return,
                    Column::WeightedPx => r.weighted_px,
                    Column::Dv01 => None,
                })
            })
            .collect())
    }

    fn set_dv01(&mut self, values: Vec<Option<f64>>) -> CoreResult<()> {
        if values.len() != self.rows.len() {
            return Err(CoreError::LengthMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.dv01 = Some(values);
        Ok(())
    }
}

// =============================================================================
// COMBINED TABLE
// =============================================================================

/// Date-indexed table of per-instrument metrics plus portfolio aggregates.
///
/// Only [`CombinedTable::new`] builds one, so every group is aligned with
/// the date index. The table serializes for export but does not
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedTable {
    dates: Vec<Date>,
    groups: Vec<InstrumentColumns>,
    total_weighted_return: Vec<Option<f64>>,
    total_weighted_px: Vec<Option<f64>>,
    missing_policy: MissingPolicy,
}

impl CombinedTable {
    /// Assembles a table and derives the two aggregate columns.
    ///
    /// `dates` must be ascending and every group must have one entry per
    /// date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LengthMismatch` if a group is misaligned and
    /// `CoreError::DuplicateInstrument` if two groups share a name.
    pub fn new(
        dates: Vec<Date>,
        groups: Vec<InstrumentColumns>,
        missing_policy: MissingPolicy,
    ) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for group in &groups {
            if group.rows.len() != dates.len() {
                return Err(CoreError::LengthMismatch {
                    expected: dates.len(),
                    actual: group.rows.len(),
                });
            }
            if !seen.insert(group.name.as_str()) {
                return Err(CoreError::DuplicateInstrument {
                    name: group.name.clone(),
                });
            }
        }

        let aggregate = |pick: fn(&InstrumentRow) -> Option<f64>| -> Vec<Option<f64>> {
            (0..dates.len())
                .map(|i| {
                    missing_policy.sum(groups.iter().map(|g| g.rows[i].as_ref().and_then(pick)))
                })
                .collect()
        };
        let total_weighted_return = aggregate(|r| r.weighted_return);
        let total_weighted_px = aggregate(|r| r.weighted_px);

        Ok(Self {
            dates,
            groups,
            total_weighted_return,
            total_weighted_px,
            missing_policy,
        })
    }

    /// Row dates in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The policy the aggregates were computed with.
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing_policy
    }

    /// Column groups in portfolio order.
    pub fn instruments(&self) -> &[InstrumentColumns] {
        &self.groups
    }

    /// Instrument names in portfolio order.
    pub fn instrument_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Looks up a column group by instrument name.
    pub fn instrument(&self, name: &str) -> Option<&InstrumentColumns> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Extracts `(instrument, column)` as values aligned to [`Self::dates`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingColumn` for an unknown instrument or an
    /// uncomputed DV01 column.
    pub fn column(&self, instrument: &str, column: Column) -> CoreResult<Vec<Option<f64>>> {
        self.instrument(instrument)
            .ok_or_else(|| CoreError::missing_column(instrument, column.as_str()))?
            .column(column)
    }

    /// `Σ weighted_return` per date.
    pub fn total_weighted_return(&self) -> &[Option<f64>] {
        &self.total_weighted_return
    }

    /// `Σ weighted_px` per date.
    pub fn total_weighted_px(&self) -> &[Option<f64>] {
        &self.total_weighted_px
    }

    /// Present aggregate returns in date order; missing rows are dropped.
    pub fn complete_total_weighted_returns(&self) -> Vec<f64> {
        self.total_weighted_return.iter().flatten().copied().collect()
    }

    /// Last present `total_weighted_px`, i.e. the latest weighted level.
    pub fn last_total_weighted_px(&self) -> Option<f64> {
        self.total_weighted_px.iter().rev().flatten().next().copied()
    }

    /// Stores a DV01 column for `instrument`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingColumn` for an unknown instrument and
    /// `CoreError::LengthMismatch` for a misaligned column.
    pub fn set_dv01(&mut self, instrument: &str, values: Vec<Option<f64>>) -> CoreResult<()> {
        self.groups
            .iter_mut()
            .find(|g| g.name == instrument)
            .ok_or_else(|| CoreError::missing_column(instrument, Column::Dv01.as_str()))?
            .set_dv01(values)
    }

    /// Names of instruments that currently carry a DV01 column.
    pub fn dv01_instruments(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| g.dv01.is_some())
            .map(|g| g.name.as_str())
            .collect()
    }
}
