//! Finite-difference DV01.
//!
//! With yields quoted in percent, one basis point is `0.01` yield units,
//! so the day-over-day sensitivity is
//!
//! ```text
//! DV01[t] = 0.01 × ΔP[t] / Δy[t]
//! ```
//!
//! A zero yield change yields `±∞` (or `NaN` for `0 / 0`). These are kept
//! as-is; [`Dv01Summary`] filters them for display.

use serde::{Deserialize, Serialize};

use bondvar_core::{Column, CombinedTable, Date};

use crate::error::{RiskError, RiskResult};

/// Yield units per basis point, for yields quoted in percent.
pub const BASIS_POINT: f64 = 0.01;

/// `0.01 × px_chg / delta_yield`. Non-finite when `delta_yield == 0`.
///
/// # Example
///
/// ```rust
/// use bondvar_risk::dv01::finite_difference_dv01;
///
/// assert!((finite_difference_dv01(0.50, 0.10) - 0.05).abs() < 1e-15);
/// assert!(finite_difference_dv01(0.50, 0.0).is_infinite());
/// ```
#[inline]
pub fn finite_difference_dv01(px_chg: f64, delta_yield: f64) -> f64 {
    BASIS_POINT * px_chg / delta_yield
}

/// Adds a DV01 column to every instrument in `instruments` that the table
/// holds, in the order given, stopping after `limit` instruments if set.
///
/// Rows missing either delta stay missing. Recomputing replaces the
/// previous columns. Returns the names of the instruments covered.
pub fn compute_dv01<S: AsRef<str>>(
    table: &mut CombinedTable,
    instruments: &[S],
    limit: Option<usize>,
) -> RiskResult<Vec<String>> {
    let covered: Vec<String> = instruments
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| table.instrument(name).is_some())
        .take(limit.unwrap_or(usize::MAX))
        .map(str::to_string)
        .collect();

    for name in &covered {
        let px_chg = table.column(name, Column::PxChg)?;
        let delta_yield = table.column(name, Column::DeltaYield)?;
        let dv01: Vec<Option<f64>> = px_chg
            .iter()
            .zip(&delta_yield)
            .map(|(p, y)| Some(finite_difference_dv01((*p)?, (*y)?)))
            .collect();

        let non_finite = dv01.iter().flatten().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            tracing::debug!(instrument = %name, non_finite, "zero yield change rows");
        }
        table.set_dv01(name, dv01)?;
    }

    tracing::info!(instruments = covered.len(), "computed DV01");
    Ok(covered)
}

// =============================================================================
// DISPLAY SUMMARY
// =============================================================================

/// One displayable DV01 row: a value per covered instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dv01Row {
    /// Row date.
    pub date: Date,
    /// DV01 per instrument, in [`Dv01Summary::instruments`] order.
    pub values: Vec<f64>,
}

/// DV01 rows fit for display.
///
/// Keeps only dates on which every instrument with a DV01 column has a
/// present, finite, non-zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dv01Summary {
    /// Instruments with a DV01 column.
    pub instruments: Vec<String>,
    /// Filtered rows.
    pub rows: Vec<Dv01Row>,
    /// Mean DV01 per instrument over `rows`; `None` when no row survives.
    pub averages: Vec<Option<f64>>,
}

impl Dv01Summary {
    /// Builds the summary from the table's DV01 columns.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` if DV01 has not been computed.
    pub fn from_table(table: &CombinedTable) -> RiskResult<Self> {
        let instruments: Vec<String> = table
            .dv01_instruments()
            .into_iter()
            .map(str::to_string)
            .collect();
        if instruments.is_empty() {
            return Err(RiskError::insufficient_data("DV01 has not been computed"));
        }

        let columns = instruments
            .iter()
            .map(|name| table.column(name, Column::Dv01))
            .collect::<Result<Vec<_>, _>>()?;

        let rows: Vec<Dv01Row> = table
            .dates()
            .iter()
            .enumerate()
            .filter_map(|(i, date)| {
                let values = columns
                    .iter()
                    .map(|col| col[i].filter(|v| v.is_finite() && *v != 0.0))
                    .collect::<Option<Vec<f64>>>()?;
                Some(Dv01Row { date: *date, values })
            })
            .collect();

        let averages = (0..instruments.len())
            .map(|j| {
                (!rows.is_empty())
                    .then(|| rows.iter().map(|r| r.values[j]).sum::<f64>() / rows.len() as f64)
            })
            .collect();

        tracing::debug!(
            rows = rows.len(),
            dropped = table.len() - rows.len(),
            "filtered DV01 rows"
        );
        Ok(Self {
            instruments,
            rows,
            averages,
        })
    }

    /// Mean DV01 of `instrument` over the displayable rows.
    pub fn average(&self, instrument: &str) -> Option<f64> {
        let j = self.instruments.iter().position(|n| n == instrument)?;
        self.averages[j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondvar_core::{InstrumentColumns, InstrumentRow, MissingPolicy};

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 1, day).unwrap()
    }

    fn row(px_chg: Option<f64>, delta_yield: Option<f64>) -> Option<InstrumentRow> {
        Some(InstrumentRow {
            px_chg,
            delta_yield,
            ..InstrumentRow::default()
        })
    }

    fn table() -> CombinedTable {
        let a = InstrumentColumns::new(
            "A",
            0.5,
            vec![
                row(None, None),
                row(Some(0.50), Some(0.10)),
                row(Some(0.20), Some(0.0)),
                row(Some(-0.30), Some(-0.05)),
            ],
        );
        let b = InstrumentColumns::new(
            "B",
            0.5,
            vec![
                row(None, None),
                row(Some(1.0), Some(-0.04)),
                row(Some(0.4), Some(0.02)),
                None,
            ],
        );
        let c = InstrumentColumns::new("C", 0.0, vec![None, None, None, None]);
        CombinedTable::new(vec![d(1), d(2), d(3), d(4)], vec![a, b, c], MissingPolicy::Propagate)
            .unwrap()
    }

    #[test]
    fn test_dv01_formula() {
        assert_relative_eq!(finite_difference_dv01(0.50, 0.10), 0.05, epsilon = 1e-15);
        assert_relative_eq!(finite_difference_dv01(-0.30, 0.05), -0.06, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_yield_change_is_non_finite() {
        let v = finite_difference_dv01(0.20, 0.0);
        assert!(v.is_infinite() && v > 0.0);
        assert!(finite_difference_dv01(-0.20, 0.0).is_infinite());
        assert!(finite_difference_dv01(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_compute_dv01_columns() {
        let mut t = table();
        let covered = compute_dv01(&mut t, &["A", "B", "C"], None).unwrap();
        assert_eq!(covered, vec!["A", "B", "C"]);

        let a = t.column("A", Column::Dv01).unwrap();
        assert_eq!(a[0], None);
        assert_relative_eq!(a[1].unwrap(), 0.05, epsilon = 1e-15);
        assert!(a[2].unwrap().is_infinite());
        assert_relative_eq!(a[3].unwrap(), 0.06, epsilon = 1e-15);

        let b = t.column("B", Column::Dv01).unwrap();
        assert_eq!(b[3], None);
    }

    #[test]
    fn test_compute_dv01_limit_and_unknown_names() {
        let mut t = table();
        let covered = compute_dv01(&mut t, &["Z", "B", "A", "C"], Some(2)).unwrap();
        assert_eq!(covered, vec!["B", "A"]);
        assert_eq!(t.dv01_instruments(), vec!["A", "B"]);
        assert!(t.column("C", Column::Dv01).is_err());
    }

    #[test]
    fn test_compute_dv01_is_repeatable() {
        let mut t = table();
        compute_dv01(&mut t, &["A"], None).unwrap();
        let first = t.column("A", Column::Dv01).unwrap();
        compute_dv01(&mut t, &["A"], None).unwrap();
        assert_eq!(first, t.column("A", Column::Dv01).unwrap());
    }

    #[test]
    fn test_summary_filters_rows() {
        let mut t = table();
        compute_dv01(&mut t, &["A", "B"], None).unwrap();
        let summary = Dv01Summary::from_table(&t).unwrap();

        // day 1 missing, day 3 infinite for A, day 4 missing for B
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].date, d(2));
        assert_relative_eq!(summary.average("A").unwrap(), 0.05, epsilon = 1e-15);
        assert_relative_eq!(summary.average("B").unwrap(), -0.25, epsilon = 1e-15);
        assert_eq!(summary.average("C"), None);
    }

    #[test]
    fn test_summary_requires_dv01() {
        assert!(matches!(
            Dv01Summary::from_table(&table()),
            Err(RiskError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_summary_with_no_surviving_rows() {
        let mut t = table();
        compute_dv01(&mut t, &["A", "C"], None).unwrap();
        let summary = Dv01Summary::from_table(&t).unwrap();
        assert!(summary.rows.is_empty());
        assert_eq!(summary.averages, vec![None, None]);
    }
}
