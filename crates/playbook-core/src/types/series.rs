//! Return series and cumulative value paths.

use serde::{Deserialize, Serialize};

use crate::compounding::cumulative_values;

/// Ordered period returns, earliest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Wraps period returns given in time order.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// A series of `periods` identical returns.
    #[must_use]
    pub fn constant(rate: f64, periods: usize) -> Self {
        Self {
            values: vec![rate; periods],
        }
    }

    /// The period returns.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no periods.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Compounds the returns into a cumulative value path starting from one unit.
    #[must_use]
    pub fn compound(&self) -> PortfolioResult {
        PortfolioResult::new(cumulative_values(&self.values))
    }
}

impl From<Vec<f64>> for ReturnSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Cumulative portfolio values, one per period, for a unit initial investment.
///
/// The value before the first period is implicitly `1.0` and is not stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioResult {
    values: Vec<f64>,
}

impl PortfolioResult {
    /// Wraps a cumulative value path.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Cumulative values per period.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no periods.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value after the last period, `1.0` for an empty path.
    pub fn final_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(1.0)
    }

    /// Total compounded return over the path.
    pub fn total_return(&self) -> f64 {
        self.final_value() - 1.0
    }

    /// Deepest peak-to-trough decline as a negative fraction (`0.0` if none).
    pub fn max_drawdown(&self) -> f64 {
        let mut peak = 1.0_f64;
        let mut worst = 0.0_f64;
        for &v in &self.values {
            peak = peak.max(v);
            worst = worst.min(v / peak - 1.0);
        }
        worst
    }
}
