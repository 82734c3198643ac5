//! BondVar Configuration Layer
//!
//! Serde-backed configuration for BondVar analyses, loaded from JSON or
//! TOML files.
//!
//! # Features
//!
//! - **Portfolio Configuration**: Instruments with series ids and weights,
//!   an explicit window or a lookback (730 days by default)
//! - **Risk Configuration**: Confidence levels, Monte Carlo paths and seed,
//!   missing-value policy, optional DV01 instrument cap
//! - **Scenario Configuration**: Named weight vectors
//! - **Validation**: Every error is reported, not just the first
//!
//! # Example
//!
//! ```rust
//! use bondvar_config::{BondVarConfig, Validate};
//!
//! let config = BondVarConfig::standard();
//! assert!(config.is_valid());
//! assert_eq!(config.risk.monte_carlo_paths, 1_000_000);
//!
//! let portfolio = config.build_portfolio().unwrap();
//! assert_eq!(portfolio.instruments().len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod bondvar;
mod error;
mod portfolio;
mod risk;
mod scenario;

pub use bondvar::{BondVarConfig, ConfigFormat};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use portfolio::{InstrumentConfig, PortfolioConfig};
pub use risk::RiskConfig;
pub use scenario::ScenarioConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bondvar::{BondVarConfig, ConfigFormat};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::portfolio::{InstrumentConfig, PortfolioConfig};
    pub use crate::risk::RiskConfig;
    pub use crate::scenario::ScenarioConfig;
}
