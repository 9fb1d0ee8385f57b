//! BTC allocation scenarios.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlaybookError, PlaybookResult};

/// A two-asset split between Bitcoin and a traditional portfolio.
///
/// # Example
///
/// ```rust
/// use playbook_core::AllocationScenario;
///
/// let moderate = AllocationScenario::new(0.05).unwrap();
/// assert_eq!(moderate.traditional_weight(), 0.95);
/// assert_eq!(moderate.to_string(), "5% BTC");
/// assert!(AllocationScenario::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AllocationScenario {
    btc_weight: f64,
}

impl AllocationScenario {
    /// A portfolio with no Bitcoin exposure.
    pub const TRADITIONAL: Self = Self { btc_weight: 0.0 };

    /// Creates an allocation with the given BTC weight.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidWeight` if the weight is outside `[0, 1]`
    /// or not finite.
    pub fn new(btc_weight: f64) -> PlaybookResult<Self> {
        if !btc_weight.is_finite() || !(0.0..=1.0).contains(&btc_weight) {
            return Err(PlaybookError::InvalidWeight { weight: btc_weight });
        }
        Ok(Self { btc_weight })
    }

    /// Fraction of portfolio value held in Bitcoin.
    pub fn btc_weight(&self) -> f64 {
        self.btc_weight
    }

    /// Fraction held in traditional assets (`1 - btc_weight`).
    pub fn traditional_weight(&self) -> f64 {
        1.0 - self.btc_weight
    }

    /// Weights in `[btc, traditional]` order.
    pub fn weights(&self) -> [f64; 2] {
        [self.btc_weight, self.traditional_weight()]
    }
}

impl TryFrom<f64> for AllocationScenario {
    type Error = PlaybookError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AllocationScenario> for f64 {
    fn from(allocation: AllocationScenario) -> Self {
        allocation.btc_weight
    }
}

impl fmt::Display for AllocationScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = self.btc_weight * 100.0;
        if (pct - pct.round()).abs() < 1e-9 {
            write!(f, "{:.0}% BTC", pct)
        } else {
            write!(f, "{:.1}% BTC", pct)
        }
    }
}

/// An allocation with a display name, e.g. `Moderate` for 5% BTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAllocation {
    /// Portfolio name used in legends and tables.
    pub name: String,
    /// The underlying weight split.
    pub allocation: AllocationScenario,
}

impl NamedAllocation {
    /// Creates a named allocation.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidWeight` for weights outside `[0, 1]`.
    pub fn new(name: impl Into<String>, btc_weight: f64) -> PlaybookResult<Self> {
        Ok(Self {
            name: name.into(),
            allocation: AllocationScenario::new(btc_weight)?,
        })
    }

    /// The four portfolios of the backtest dashboard.
    pub fn dashboard_defaults() -> Vec<Self> {
        [
            ("Traditional", 0.00),
            ("Conservative", 0.01),
            ("Moderate", 0.05),
            ("Aggressive", 0.10),
        ]
        .into_iter()
        .map(|(name, btc_weight)| Self {
            name: name.to_string(),
            allocation: AllocationScenario { btc_weight },
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(AllocationScenario::new(0.0).is_ok());
        assert!(AllocationScenario::new(1.0).is_ok());
        assert!(AllocationScenario::new(-0.01).is_err());
        assert!(AllocationScenario::new(f64::NAN).is_err());
    }

    #[test]
    fn test_weights_sum_to_one() {
        let a = AllocationScenario::new(0.1).unwrap();
        let [btc, trad] = a.weights();
        assert!((btc + trad - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(AllocationScenario::TRADITIONAL.to_string(), "0% BTC");
        assert_eq!(AllocationScenario::new(0.10).unwrap().to_string(), "10% BTC");
        assert_eq!(AllocationScenario::new(0.025).unwrap().to_string(), "2.5% BTC");
    }

    #[test]
    fn test_dashboard_defaults() {
        let portfolios = NamedAllocation::dashboard_defaults();
        let names: Vec<_> = portfolios.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Traditional", "Conservative", "Moderate", "Aggressive"]);
        assert_eq!(portfolios[2].allocation.btc_weight(), 0.05);
    }
}
