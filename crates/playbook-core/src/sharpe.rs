//! Sharpe ratio calculation and asset ranking.

use serde::Serialize;
use std::cmp::Ordering;

use crate::error::{PlaybookError, PlaybookResult};
use crate::types::{AssetClass, HexColor};

/// Calculates the Sharpe ratio `(return - risk_free) / volatility`.
///
/// # Arguments
///
/// * `annual_return` - Annual return as a fraction (0.42 = 42%)
/// * `annual_volatility` - Annual volatility as a fraction
/// * `risk_free_rate` - Annual risk-free rate as a fraction
///
/// # Errors
///
/// Returns `PlaybookError::InvalidVolatility` when the volatility is zero,
/// negative or not finite.
pub fn sharpe_ratio(
    annual_return: f64,
    annual_volatility: f64,
    risk_free_rate: f64,
) -> PlaybookResult<f64> {
    if !annual_volatility.is_finite() || annual_volatility <= 0.0 {
        return Err(PlaybookError::invalid_volatility("asset", annual_volatility));
    }
    Ok((annual_return - risk_free_rate) / annual_volatility)
}

/// One asset class with its computed Sharpe ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharpeRow {
    /// Asset class name.
    pub name: String,
    /// Risk-adjusted return.
    pub sharpe: f64,
    /// Annual return used for the ratio.
    pub annual_return: f64,
    /// Annual volatility used for the ratio.
    pub annual_volatility: f64,
    /// Display color, if the asset carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
}

/// Computes a Sharpe ratio per asset and sorts the rows, best first.
///
/// Ties keep alphabetical order by name. Any asset with an invalid
/// volatility fails the whole ranking, naming that asset.
///
/// # Errors
///
/// Returns `PlaybookError::InvalidVolatility` for the first invalid asset.
pub fn rank_by_sharpe(assets: &[AssetClass], risk_free_rate: f64) -> PlaybookResult<Vec<SharpeRow>> {
    let mut rows = assets
        .iter()
        .map(|asset| {
            let sharpe = sharpe_ratio(asset.expected_return, asset.volatility, risk_free_rate)
                .map_err(|_| PlaybookError::invalid_volatility(&asset.name, asset.volatility))?;
            Ok(SharpeRow {
                name: asset.name.clone(),
                sharpe,
                annual_return: asset.expected_return,
                annual_volatility: asset.volatility,
                color: asset.color,
            })
        })
        .collect::<PlaybookResult<Vec<_>>>()?;

    rows.sort_by(|a, b| {
        b.sharpe
            .partial_cmp(&a.sharpe)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(rows)
}

/// The five asset classes of the reference Sharpe dashboard (annual figures).
pub fn reference_assets() -> Vec<AssetClass> {
    [
        ("Bitcoin", HexColor::new(0xF7, 0x93, 0x1A), 0.42, 0.65),
        ("S&P 500", HexColor::new(0x1E, 0x88, 0xE5), 0.12, 0.18),
        ("Gold", HexColor::new(0xFF, 0xC1, 0x07), 0.08, 0.15),
        ("US Bonds", HexColor::new(0x4C, 0xAF, 0x50), 0.03, 0.05),
        ("60/40 Portfolio", HexColor::new(0x9C, 0x27, 0xB0), 0.09, 0.12),
    ]
    .into_iter()
    .map(|(name, color, ret, vol)| AssetClass::new(name, ret, vol).with_color(color))
    .collect()
}

/// Risk-free rate of the reference dashboard (5-year Treasury, 2.5%).
pub const REFERENCE_RISK_FREE_RATE: f64 = 0.025;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bitcoin_example() {
        let s = sharpe_ratio(0.42, 0.65, 0.025).unwrap();
        assert_relative_eq!(s, 0.395 / 0.65, epsilon = 1e-12);
        assert_relative_eq!(s, 0.6077, epsilon = 1e-4);
    }

    #[test]
    fn test_sign_flip() {
        let above = sharpe_ratio(0.05, 0.1, 0.02).unwrap();
        let below = sharpe_ratio(-0.01, 0.1, 0.02).unwrap();
        assert_relative_eq!(above, -below, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_volatility() {
        assert!(sharpe_ratio(0.1, 0.0, 0.02).is_err());
        assert!(sharpe_ratio(0.1, -0.2, 0.02).is_err());
        assert!(sharpe_ratio(0.1, f64::NAN, 0.02).is_err());
    }

    #[test]
    fn test_reference_ranking() {
        let rows = rank_by_sharpe(&reference_assets(), REFERENCE_RISK_FREE_RATE).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Bitcoin", "60/40 Portfolio", "S&P 500", "Gold", "US Bonds"]
        );
        assert_relative_eq!(rows[0].sharpe, 0.607_692_308, epsilon = 1e-8);
        assert_relative_eq!(rows[1].sharpe, 0.541_666_667, epsilon = 1e-8);
        assert_relative_eq!(rows[2].sharpe, 0.527_777_778, epsilon = 1e-8);
        assert_relative_eq!(rows[4].sharpe, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_ranking_names_invalid_asset() {
        let assets = vec![
            AssetClass::new("Bitcoin", 0.42, 0.65),
            AssetClass::new("Stablecoin", 0.04, 0.0),
        ];
        let err = rank_by_sharpe(&assets, 0.025).unwrap_err();
        assert!(err.to_string().contains("Stablecoin"));
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let assets = vec![
            AssetClass::new("Zeta", 0.10, 0.10),
            AssetClass::new("Alpha", 0.10, 0.10),
        ];
        let rows = rank_by_sharpe(&assets, 0.0).unwrap();
        assert_eq!(rows[0].name, "Alpha");
    }
}
