//! Asset class parameters.

use serde::{Deserialize, Serialize};

use super::HexColor;
use crate::error::{PlaybookError, PlaybookResult};

/// An asset class described by its expected return and volatility.
///
/// Both figures are per period: annual for the Sharpe dashboard and the
/// allocation scenarios, monthly for the backtest dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetClass {
    /// Display name.
    pub name: String,
    /// Expected (mean) return per period.
    pub expected_return: f64,
    /// Standard deviation of returns per period.
    pub volatility: f64,
    /// Optional display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
}

impl AssetClass {
    /// Creates an asset class without a display color.
    #[must_use]
    pub fn new(name: impl Into<String>, expected_return: f64, volatility: f64) -> Self {
        Self {
            name: name.into(),
            expected_return,
            volatility,
            color: None,
        }
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: HexColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Checks that the volatility is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidVolatility` otherwise.
    pub fn validate(&self) -> PlaybookResult<()> {
        if !self.volatility.is_finite() || self.volatility <= 0.0 {
            return Err(PlaybookError::invalid_volatility(&self.name, self.volatility));
        }
        if !self.expected_return.is_finite() {
            return Err(PlaybookError::invalid_parameter(
                format!("{} return", self.name),
                "must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(AssetClass::new("Bitcoin", 0.42, 0.65).validate().is_ok());
        assert!(matches!(
            AssetClass::new("Cash", 0.01, 0.0).validate(),
            Err(PlaybookError::InvalidVolatility { .. })
        ));
        assert!(AssetClass::new("Broken", 0.01, f64::NAN).validate().is_err());
        assert!(AssetClass::new("Broken", f64::INFINITY, 0.1).validate().is_err());
    }
}
