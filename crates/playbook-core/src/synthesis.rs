//! Synthetic return generation and portfolio blending.
//!
//! Returns are drawn independently from a normal distribution. A generator
//! built with [`ReturnGenerator::seeded`] reproduces the same draws on every
//! run; [`ReturnGenerator::from_entropy`] does not.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::{PlaybookError, PlaybookResult};
use crate::types::{AllocationScenario, AssetClass, ReturnSeries};

/// Source of normally distributed period returns.
#[derive(Debug, Clone)]
pub struct ReturnGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl ReturnGenerator {
    /// Creates a reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    #[must_use]
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// The seed this generator was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draws `count` independent samples from `N(mean, std_dev)`.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidVolatility` if `std_dev` is not strictly
    /// positive and finite, or `PlaybookError::Distribution` when the normal
    /// distribution cannot be built (e.g. a non-finite mean).
    pub fn normal_returns(
        &mut self,
        mean: f64,
        std_dev: f64,
        count: usize,
    ) -> PlaybookResult<ReturnSeries> {
        self.sample_named("returns", mean, std_dev, count)
    }

    /// Draws `count` period returns for an asset class.
    ///
    /// # Errors
    ///
    /// Same as [`normal_returns`](Self::normal_returns), naming the asset.
    pub fn sample_asset(&mut self, asset: &AssetClass, count: usize) -> PlaybookResult<ReturnSeries> {
        self.sample_named(&asset.name, asset.expected_return, asset.volatility, count)
    }

    fn sample_named(
        &mut self,
        name: &str,
        mean: f64,
        std_dev: f64,
        count: usize,
    ) -> PlaybookResult<ReturnSeries> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(PlaybookError::invalid_volatility(name, std_dev));
        }
        if !mean.is_finite() {
            return Err(PlaybookError::distribution(name, "mean must be finite"));
        }
        let normal = Normal::new(mean, std_dev)
            .map_err(|e| PlaybookError::distribution(name, e.to_string()))?;

        debug!(asset = name, mean, std_dev, count, "sampling normal returns");
        let values = normal.sample_iter(&mut self.rng).take(count).collect();
        Ok(ReturnSeries::new(values))
    }
}

/// Weighted sum of several return series, period by period.
///
/// # Errors
///
/// - `PlaybookError::EmptyInput` when no series are given
/// - `PlaybookError::WeightMismatch` when weights and series differ in count
/// - `PlaybookError::LengthMismatch` when the series differ in length
///
/// # Example
///
/// ```rust
/// use playbook_core::synthesis::blend;
/// use playbook_core::ReturnSeries;
///
/// let btc = ReturnSeries::new(vec![0.10, -0.20]);
/// let bonds = ReturnSeries::new(vec![0.01, 0.01]);
/// let mixed = blend(&[&btc, &bonds], &[0.1, 0.9]).unwrap();
/// assert!((mixed.values()[0] - 0.019).abs() < 1e-12);
/// ```
pub fn blend(series: &[&ReturnSeries], weights: &[f64]) -> PlaybookResult<ReturnSeries> {
    let first = series
        .first()
        .ok_or_else(|| PlaybookError::empty("return series to blend"))?;
    if series.len() != weights.len() {
        return Err(PlaybookError::WeightMismatch {
            series: series.len(),
            weights: weights.len(),
        });
    }

    let periods = first.len();
    if let Some(other) = series.iter().find(|s| s.len() != periods) {
        return Err(PlaybookError::LengthMismatch {
            expected: periods,
            actual: other.len(),
        });
    }

    let values = (0..periods)
        .map(|t| {
            series
                .iter()
                .zip(weights)
                .map(|(s, w)| w * s.values()[t])
                .sum::<f64>()
        })
        .collect();

    Ok(ReturnSeries::new(values))
}

/// Blends Bitcoin and traditional returns according to an allocation.
///
/// # Errors
///
/// Returns `PlaybookError::LengthMismatch` if the series differ in length.
pub fn blend_allocation(
    btc: &ReturnSeries,
    traditional: &ReturnSeries,
    allocation: &AllocationScenario,
) -> PlaybookResult<ReturnSeries> {
    blend(&[btc, traditional], &allocation.weights())
}
