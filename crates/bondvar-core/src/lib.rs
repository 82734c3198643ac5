//! # BondVar Core
//!
//! Core types shared by every BondVar crate.
//!
//! - **Types**: [`Date`], [`SeriesId`], [`TimeSeries`]
//! - **Combined table**: [`CombinedTable`], the date-aligned per-instrument
//!   metrics table that the VaR and DV01 engines read from
//!
//! ## Missing values
//!
//! A missing observation is `None`, never `NaN`. `NaN` and `±inf` only show
//! up in computed DV01 columns, where a zero yield move is a legitimate
//! non-finite result.
//!
//! ## Example
//!
//! ```rust
//! use bondvar_core::prelude::*;
//!
//! let d = Date::from_ymd(2024, 1, 2).unwrap();
//! let series: TimeSeries = [(d, 101.5), (d.add_days(1), 101.9)].into_iter().collect();
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.get(d), Some(101.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod table;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::table::{Column, CombinedTable, InstrumentColumns, InstrumentRow, MissingPolicy};
    pub use crate::types::{Date, SeriesId, TimeSeries};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use table::{Column, CombinedTable, InstrumentColumns, InstrumentRow, MissingPolicy};
pub use types::{Date, SeriesId, TimeSeries};
