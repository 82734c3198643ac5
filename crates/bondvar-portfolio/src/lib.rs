//! # BondVar Portfolio
//!
//! Weighted bond-index portfolios and their risk analytics.
//!
//! A [`Portfolio`] holds a set of [`BondIndex`] instruments, each naming a
//! yield series and a total-return price series. The portfolio:
//!
//! - **Hydrates** absent series from any [`SeriesSource`](bondvar_traits::SeriesSource),
//!   reporting per-series failures instead of aborting
//! - **Aligns** the series into a [`CombinedTable`](bondvar_core::CombinedTable),
//!   built lazily and cached until invalidated
//! - **Computes** historical and Monte Carlo VaR, DV01, and the return
//!   distribution over the table
//! - **Reweights** itself for [weighting scenarios](scenario)
//!
//! ## Quick Start
//!
//! ```rust
//! use bondvar_core::{Date, TimeSeries};
//! use bondvar_ext_file::InMemorySeriesSource;
//! use bondvar_portfolio::prelude::*;
//!
//! let d = |day| Date::from_ymd(2024, 1, day).unwrap();
//! let source = InMemorySeriesSource::new()
//!     .with_series("Y", [(d(2), 4.50), (d(3), 4.60)].into_iter().collect::<TimeSeries>())
//!     .with_series("P", [(d(2), 100.0), (d(3), 99.5)].into_iter().collect::<TimeSeries>());
//!
//! let mut portfolio = Portfolio::builder("Single")
//!     .start_date(d(1))
//!     .end_date(d(31))
//!     .instrument(BondIndex::new("AAA", "Y", "P", 1.0))
//!     .build()
//!     .unwrap();
//!
//! let report = portfolio.hydrate(&source);
//! assert!(report.is_complete());
//!
//! portfolio.calc_portfolio_dv01().unwrap();
//! let summary = portfolio.dv01_summary().unwrap();
//! assert!((summary.average("AAA").unwrap() - (-0.05)).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod alignment;
pub mod error;
pub mod hydration;
pub mod instrument;
pub mod portfolio;
pub mod scenario;
pub mod state;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

pub use hydration::{HydratedSeries, HydrationFailure, PartialHydrationReport};
pub use instrument::BondIndex;
pub use portfolio::{Portfolio, PortfolioBuilder, RiskSettings, DEFAULT_LOOKBACK_DAYS};
pub use scenario::{run_scenarios, ScenarioOutcome, WeightingScenario};
pub use state::ComputedState;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::hydration::{HydrationFailure, PartialHydrationReport};
    pub use crate::instrument::BondIndex;
    pub use crate::portfolio::{Portfolio, PortfolioBuilder, RiskSettings};
    pub use crate::scenario::{run_scenarios, ScenarioOutcome, WeightingScenario};
}
