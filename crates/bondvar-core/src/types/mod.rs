//! Domain types for series analytics.
//!
//! - [`Date`]: Calendar date keying every observation
//! - [`SeriesId`]: Identifier of an external economic-data series
//! - [`TimeSeries`]: Ascending date-keyed `f64` observations

mod date;
mod series;

pub use date::Date;
pub use series::{SeriesId, TimeSeries};
