//! # BondVar Traits
//!
//! Trait definitions for the BondVar analytics workspace.
//!
//! This crate contains ONLY the narrow interfaces the engine consumes.
//! Implementations live in extension crates (`bondvar-ext-file`).
//!
//! ## Module Structure
//!
//! - [`source`]: The ordered, date-keyed series fetcher used for hydration
//! - [`error`]: The per-fetch error type
//!
//! ## Dependency Injection
//!
//! The portfolio hydrates itself from any [`source::SeriesSource`]:
//!
//! ```ignore
//! let report = portfolio.hydrate(&CsvSeriesSource::from_path("series.csv")?);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod source;

// Re-export commonly used types
pub use error::TraitError;
pub use source::{SeriesField, SeriesSource, SourceType};
