//! Seeded normal sampling.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{MathError, MathResult};

/// Draws from `N(mean, std_dev²)` using a generator seeded from a `u64`.
///
/// Every call to [`NormalSampler::sample`] or [`NormalSampler::fill`]
/// reseeds, so the same sampler always produces the same draws.
///
/// # Example
///
/// ```rust
/// use bondvar_math::sampling::NormalSampler;
///
/// let sampler = NormalSampler::new(0.0, 1.0, 1).unwrap();
/// assert_eq!(sampler.sample(100), sampler.sample(100));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NormalSampler {
    mean: f64,
    std_dev: f64,
    seed: u64,
    distribution: Normal<f64>,
}

impl NormalSampler {
    /// Creates a sampler.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidDistribution` for a non-finite mean or a
    /// negative or non-finite standard deviation.
    pub fn new(mean: f64, std_dev: f64, seed: u64) -> MathResult<Self> {
        if !mean.is_finite() {
            return Err(MathError::invalid_distribution(format!(
                "mean must be finite, got {mean}"
            )));
        }
        let distribution = Normal::new(mean, std_dev).map_err(|e| {
            MathError::invalid_distribution(format!("std_dev {std_dev}: {e}"))
        })?;
        Ok(Self {
            mean,
            std_dev,
            seed,
            distribution,
        })
    }

    /// Distribution mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Distribution standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Generator seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Overwrites `out` with draws, reusing its allocation.
    pub fn fill(&self, out: &mut [f64]) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        for slot in out.iter_mut() {
            *slot = self.distribution.sample(&mut rng);
        }
    }

    /// Returns `n` draws.
    pub fn sample(&self, n: usize) -> Vec<f64> {
        let mut out = vec![0.0; n];
        self.fill(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{mean, population_std_dev};

    #[test]
    fn test_same_seed_same_draws() {
        let a = NormalSampler::new(0.001, 0.01, 1).unwrap().sample(1_000);
        let b = NormalSampler::new(0.001, 0.01, 1).unwrap().sample(1_000);
        assert_eq!(a, b);

        let c = NormalSampler::new(0.001, 0.01, 2).unwrap().sample(1_000);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fill_matches_sample() {
        let sampler = NormalSampler::new(0.0, 1.0, 7).unwrap();
        let mut buf = vec![f64::NAN; 64];
        sampler.fill(&mut buf);
        assert_eq!(buf, sampler.sample(64));
    }

    #[test]
    fn test_draws_match_parameters() {
        let draws = NormalSampler::new(0.5, 2.0, 1).unwrap().sample(200_000);
        assert!((mean(&draws) - 0.5).abs() < 0.05);
        assert!((population_std_dev(&draws) - 2.0).abs() < 0.05);
    }

    #[test]
    fn test_zero_std_is_degenerate() {
        let draws = NormalSampler::new(0.25, 0.0, 1).unwrap().sample(10);
        assert!(draws.iter().all(|&x| x == 0.25));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            NormalSampler::new(0.0, -1.0, 1),
            Err(MathError::InvalidDistribution { .. })
        ));
        assert!(NormalSampler::new(0.0, f64::NAN, 1).is_err());
        assert!(NormalSampler::new(f64::INFINITY, 1.0, 1).is_err());
    }
}
