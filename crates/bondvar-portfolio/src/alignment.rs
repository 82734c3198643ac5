//! Series alignment and derived metrics.
//!
//! Each instrument is first assembled on its own yield calendar: price is
//! left-joined onto yield by date and the day-over-day deltas are taken
//! between consecutive rows of that calendar. Instruments are then
//! outer-joined on the union of their dates.

use std::collections::{BTreeMap, BTreeSet};

use bondvar_core::{
    CombinedTable, CoreResult, Date, InstrumentColumns, InstrumentRow, MissingPolicy,
};

use crate::instrument::BondIndex;

/// Builds the combined table for `instruments`, in order.
///
/// An instrument without a yield series contributes a column group with
/// no rows, which the aggregates then treat per `policy`.
pub fn build_combined_table(
    instruments: &[BondIndex],
    policy: MissingPolicy,
) -> CoreResult<CombinedTable> {
    let per_instrument: Vec<BTreeMap<Date, InstrumentRow>> =
        instruments.iter().map(instrument_rows).collect();

    let dates: Vec<Date> = per_instrument
        .iter()
        .flat_map(BTreeMap::keys)
        .copied()
        .collect::<BTreeSet<Date>>()
        .into_iter()
        .collect();

    let groups: Vec<InstrumentColumns> = instruments
        .iter()
        .zip(&per_instrument)
        .map(|(index, rows)| {
            tracing::debug!(instrument = index.name(), rows = rows.len(), "aligned instrument");
            let aligned = dates.iter().map(|d| rows.get(d).copied()).collect();
            InstrumentColumns::new(index.name(), index.weight(), aligned)
        })
        .collect();

    let table = CombinedTable::new(dates, groups, policy)?;
    let missing = table.total_weighted_return().iter().filter(|r| r.is_none()).count();
    tracing::debug!(
        rows = table.len(),
        missing_total_weighted_return = missing,
        policy = %policy,
        "built combined table"
    );
    Ok(table)
}

/// Rows of one instrument on its own yield calendar.
///
/// A non-finite observation is read as missing: the row keeps its date,
/// and the deltas on that date and the next one stay missing.
fn instrument_rows(index: &BondIndex) -> BTreeMap<Date, InstrumentRow> {
    let Some(yields) = index.yield_series() else {
        return BTreeMap::new();
    };
    let prices = index.price_series();
    let weight = index.weight();

    let mut rows = BTreeMap::new();
    let mut prev: Option<(Option<f64>, Option<f64>)> = None;
    for (date, yield_value) in yields.iter() {
        let yield_value = finite(yield_value);
        let price = prices.and_then(|p| p.get(date)).and_then(finite);

        let (delta_yield, px_chg, daily_return) = match prev {
            Some((prev_yield, prev_price)) => {
                let pair = price.zip(prev_price);
                (
                    yield_value.zip(prev_yield).map(|(y, x)| y - x),
                    pair.map(|(p, q)| p - q),
                    pair.map(|(p, q)| p / q - 1.0),
                )
            }
            None => (None, None, None),
        };

        rows.insert(
            date,
            InstrumentRow {
                yield_value,
                price,
                delta_yield,
                px_chg,
                daily_return,
                weighted_return: daily_return.map(|r| r * weight),
                weighted_px: price.map(|p| p * weight),
            },
        );
        prev = Some((yield_value, price));
    }
    rows
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
