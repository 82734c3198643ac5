//! Monte Carlo VaR calculation.

use serde::{Deserialize, Serialize};

use bondvar_math::percentile::percentile_linear;
use bondvar_math::sampling::NormalSampler;
use bondvar_math::statistics::{mean, population_std_dev};

use super::{require_returns, validate_confidence};
use crate::error::{RiskError, RiskResult};

/// Default number of simulated returns.
pub const DEFAULT_MC_PATHS: usize = 1_000_000;

/// Default generator seed.
pub const DEFAULT_MC_SEED: u64 = 1;

/// Simulation parameters for Monte Carlo VaR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloSettings {
    /// Number of normal draws.
    pub paths: usize,
    /// Generator seed.
    pub seed: u64,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: DEFAULT_MC_PATHS,
            seed: DEFAULT_MC_SEED,
        }
    }
}

impl MonteCarloSettings {
    /// Creates settings with explicit path count and seed.
    #[must_use]
    pub fn new(paths: usize, seed: u64) -> Self {
        Self { paths, seed }
    }

    /// Checks the path count.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidParameter` for zero paths.
    pub fn validate(&self) -> RiskResult<()> {
        if self.paths == 0 {
            return Err(RiskError::invalid_parameter("Monte Carlo paths must be positive"));
        }
        Ok(())
    }
}

/// Monte Carlo VaR.
///
/// Fits `N(μ, σ²)` to `returns` (population standard deviation), draws
/// `settings.paths` samples with `settings.seed`, and returns the
/// linearly interpolated `(100 - cint)`-th percentile of the draws.
/// Identical inputs give bit-identical results.
pub fn monte_carlo_var(
    returns: &[f64],
    cint: f64,
    settings: &MonteCarloSettings,
) -> RiskResult<f64> {
    validate_confidence(cint)?;
    settings.validate()?;
    require_returns(returns)?;

    let mu = mean(returns);
    let sigma = population_std_dev(returns);
    let sampler = NormalSampler::new(mu, sigma, settings.seed)?;

    tracing::debug!(
        mean = mu,
        std_dev = sigma,
        paths = settings.paths,
        seed = settings.seed,
        "simulating returns"
    );

    let mut draws = sampler.sample(settings.paths);
    Ok(percentile_linear(&mut draws, 100.0 - cint)?)
}
