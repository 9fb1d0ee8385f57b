//! Backtest dashboard: blended BTC/traditional portfolios over monthly periods.
//!
//! One BTC return path and one traditional return path are drawn for the
//! whole window and shared by every portfolio, so the curves differ only in
//! their allocation.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::compounding::annualized_growth;
use crate::error::{PlaybookError, PlaybookResult};
use crate::synthesis::{blend_allocation, ReturnGenerator};
use crate::types::{AssetClass, NamedAllocation, PortfolioResult, ReturnSeries};

/// Seed used by the reference dashboard.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of a backtest run.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSpec {
    /// Any date in the first month; periods end on month-ends.
    pub start: NaiveDate,
    /// Number of monthly periods.
    pub periods: usize,
    /// Monthly BTC return distribution.
    pub btc: AssetClass,
    /// Monthly traditional-portfolio return distribution.
    pub traditional: AssetClass,
    /// Portfolios to compare.
    pub portfolios: Vec<NamedAllocation>,
}

impl Default for BacktestSpec {
    /// January 2020 through December 2024, monthly BTC `N(3.5%, 20%)` and
    /// traditional `N(0.5%, 4%)`, four dashboard portfolios.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            periods: 60,
            btc: AssetClass::new("Bitcoin", 0.035, 0.20),
            traditional: AssetClass::new("Traditional", 0.005, 0.04),
            portfolios: NamedAllocation::dashboard_defaults(),
        }
    }
}

impl BacktestSpec {
    /// Month-end dates for every period.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidParameter` if the window runs past the
    /// supported calendar range.
    pub fn dates(&self) -> PlaybookResult<Vec<NaiveDate>> {
        (0..self.periods)
            .map(|i| month_end(self.start, i as u32))
            .collect()
    }

    /// Draws returns and compounds every portfolio.
    ///
    /// # Errors
    ///
    /// Fails on invalid volatilities, an empty portfolio list or a zero-length window.
    pub fn run(&self, generator: &mut ReturnGenerator) -> PlaybookResult<BacktestReport> {
        if self.periods == 0 {
            return Err(PlaybookError::invalid_parameter("periods", "must be at least 1"));
        }
        if self.portfolios.is_empty() {
            return Err(PlaybookError::empty("backtest portfolios"));
        }
        self.btc.validate()?;
        self.traditional.validate()?;

        let dates = self.dates()?;
        let btc_returns = generator.sample_asset(&self.btc, self.periods)?;
        let trad_returns = generator.sample_asset(&self.traditional, self.periods)?;

        let curves = self
            .portfolios
            .iter()
            .map(|portfolio| {
                let blended = blend_allocation(&btc_returns, &trad_returns, &portfolio.allocation)?;
                let curve = blended.compound();
                debug!(
                    portfolio = %portfolio.name,
                    final_value = curve.final_value(),
                    "compounded backtest portfolio"
                );
                Ok(BacktestCurve {
                    portfolio: portfolio.clone(),
                    returns: blended,
                    values: curve,
                })
            })
            .collect::<PlaybookResult<Vec<_>>>()?;

        info!(
            periods = self.periods,
            portfolios = curves.len(),
            seed = ?generator.seed(),
            "backtest complete"
        );

        Ok(BacktestReport { dates, curves })
    }
}

/// One portfolio's blended returns and cumulative values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestCurve {
    /// The portfolio definition.
    pub portfolio: NamedAllocation,
    /// Blended monthly returns.
    pub returns: ReturnSeries,
    /// Cumulative values, one per month.
    pub values: PortfolioResult,
}

/// Output of a backtest: dates plus one curve per portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    /// Month-end date of every period.
    pub dates: Vec<NaiveDate>,
    /// Curves in portfolio order.
    pub curves: Vec<BacktestCurve>,
}

impl BacktestReport {
    /// First and last date of the window.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Headline statistics per portfolio.
    pub fn summaries(&self) -> Vec<BacktestSummary> {
        self.curves
            .iter()
            .map(|c| BacktestSummary {
                portfolio: c.portfolio.name.clone(),
                btc_weight: c.portfolio.allocation.btc_weight(),
                final_value: c.values.final_value(),
                total_return: c.values.total_return(),
                annualized_return: annualized_growth(c.values.final_value(), c.values.len(), 12.0),
                max_drawdown: c.values.max_drawdown(),
            })
            .collect()
    }
}

/// Headline statistics of one backtest portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestSummary {
    /// Portfolio name.
    pub portfolio: String,
    /// BTC weight.
    pub btc_weight: f64,
    /// Value of one unit invested at the start.
    pub final_value: f64,
    /// Total compounded return.
    pub total_return: f64,
    /// Compound annual growth rate.
    pub annualized_return: f64,
    /// Deepest drawdown (negative fraction).
    pub max_drawdown: f64,
}

/// Last day of the month `offset` months after `start`'s month.
fn month_end(start: NaiveDate, offset: u32) -> PlaybookResult<NaiveDate> {
    let out_of_range =
        || PlaybookError::invalid_parameter("start", "backtest window exceeds calendar range");

    let first = start.with_day(1).ok_or_else(out_of_range)?;
    first
        .checked_add_months(Months::new(offset + 1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_dates() {
        let dates = BacktestSpec::default().dates().unwrap();
        assert_eq!(dates.len(), 60);
        assert_eq!(dates[0], ymd(2020, 1, 31));
        assert_eq!(dates[1], ymd(2020, 2, 29));
        assert_eq!(dates[59], ymd(2024, 12, 31));
    }

    #[test]
    fn test_month_end_mid_month_start() {
        assert_eq!(month_end(ymd(2023, 1, 15), 1).unwrap(), ymd(2023, 2, 28));
        assert_eq!(month_end(ymd(2023, 11, 30), 2).unwrap(), ymd(2024, 1, 31));
    }

    #[test]
    fn test_default_run() {
        let report = BacktestSpec::default()
            .run(&mut ReturnGenerator::seeded(DEFAULT_SEED))
            .unwrap();
        assert_eq!(report.curves.len(), 4);
        assert!(report.curves.iter().all(|c| c.values.len() == 60));
        assert_eq!(report.date_range(), Some((ymd(2020, 1, 31), ymd(2024, 12, 31))));

        let summaries = report.summaries();
        assert_eq!(summaries[0].portfolio, "Traditional");
        assert_eq!(summaries[3].btc_weight, 0.10);
    }

    #[test]
    fn test_seed_reproducible() {
        let spec = BacktestSpec::default();
        let a = spec.run(&mut ReturnGenerator::seeded(5)).unwrap();
        let b = spec.run(&mut ReturnGenerator::seeded(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_draws() {
        // Traditional (0% BTC) equals the compounded traditional draw, and the
        // difference between any two portfolios is linear in their weights.
        let report = BacktestSpec::default()
            .run(&mut ReturnGenerator::seeded(11))
            .unwrap();
        let trad = &report.curves[0].returns;
        let moderate = &report.curves[2].returns;
        let aggressive = &report.curves[3].returns;
        for t in 0..trad.len() {
            let d1 = moderate.values()[t] - trad.values()[t];
            let d2 = aggressive.values()[t] - trad.values()[t];
            assert!((d2 - 2.0 * d1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_empty_window() {
        let spec = BacktestSpec {
            periods: 0,
            ..BacktestSpec::default()
        };
        assert!(spec.run(&mut ReturnGenerator::seeded(1)).is_err());

        let spec = BacktestSpec {
            portfolios: vec![],
            ..BacktestSpec::default()
        };
        assert!(matches!(
            spec.run(&mut ReturnGenerator::seeded(1)),
            Err(PlaybookError::EmptyInput { .. })
        ));
    }
}
