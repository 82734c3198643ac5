//! # bondvar-risk
//!
//! Portfolio risk analytics over the combined metrics table.
//!
//! This crate provides:
//!
//! - **VaR**: Historical ("lower" percentile) and Monte Carlo (seeded normal)
//! - **DV01**: Finite-difference price change per basis point of yield
//! - **Return distribution**: Moments of the aggregate return series
//!
//! ## Example
//!
//! ```rust
//! use bondvar_risk::prelude::*;
//!
//! let returns = [-0.02, -0.01, 0.00, 0.01, 0.02];
//! assert_eq!(historical_var(&returns, 80.0).unwrap(), -0.01);
//!
//! let mc = monte_carlo_var(&returns, 95.0, &MonteCarloSettings::new(10_000, 1)).unwrap();
//! assert!(mc < 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distribution;
pub mod dv01;
mod error;
pub mod var;

pub use error::{RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::distribution::ReturnDistribution;
    pub use crate::dv01::*;
    pub use crate::var::*;
    pub use crate::{RiskError, RiskResult};
}
