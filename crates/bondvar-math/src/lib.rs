//! # BondVar Math
//!
//! Statistical utilities for the BondVar analytics workspace.
//!
//! This crate provides:
//!
//! - **Percentiles**: the "lower" rank estimator and numpy-style linear
//!   interpolation, both selecting in place instead of sorting
//! - **Moments**: mean, population standard deviation, skewness, excess kurtosis
//! - **Sampling**: seeded normal draws for reproducible Monte Carlo
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: the same seed yields the same draws, bit for bit
//! - **Explicit emptiness**: empty samples are errors, never `NaN`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod percentile;
pub mod sampling;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::percentile::{percentile, percentile_linear, percentile_lower, PercentileMethod};
    pub use crate::sampling::NormalSampler;
    pub use crate::statistics::{excess_kurtosis, mean, population_std_dev, skewness, Moments};
}

pub use error::{MathError, MathResult};
