//! # Playbook Core
//!
//! Numeric building blocks for the treasury playbook charts.
//!
//! This crate provides everything the chart commands compute before anything
//! is drawn:
//!
//! - **Types**: `AssetClass`, `AllocationScenario`, `ReturnSeries`,
//!   `PortfolioResult`, `CustodyScoreMatrix`
//! - **Synthesis**: normally distributed period returns and weighted blends
//! - **Compounding**: cumulative value paths from period returns
//! - **Sharpe**: risk-adjusted return ratios and rankings
//! - **Backtest**: monthly blended-portfolio dashboard data
//! - **Monte Carlo**: allocation scenarios and percentile fan bands
//!
//! ## Example
//!
//! ```rust
//! use playbook_core::prelude::*;
//!
//! let returns = ReturnSeries::new(vec![0.1, -0.05, 0.02]);
//! let value = returns.compound().final_value();
//! assert!((value - 1.06590).abs() < 1e-5);
//!
//! let sharpe = sharpe_ratio(0.42, 0.65, 0.025).unwrap();
//! assert!((sharpe - 0.6077).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod backtest;
pub mod compounding;
pub mod error;
pub mod monte_carlo;
pub mod sharpe;
pub mod synthesis;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::backtest::{BacktestReport, BacktestSpec, BacktestSummary};
    pub use crate::compounding::cumulative_values;
    pub use crate::error::{PlaybookError, PlaybookResult};
    pub use crate::monte_carlo::{
        FanBand, MarketScenario, ScenarioOutcome, ScenarioSpec, ScenarioSummary,
    };
    pub use crate::sharpe::{
        rank_by_sharpe, reference_assets, sharpe_ratio, SharpeRow, REFERENCE_RISK_FREE_RATE,
    };
    pub use crate::synthesis::ReturnGenerator;
    pub use crate::types::{
        AllocationScenario, AssetClass, CustodyModel, CustodyScoreMatrix, HexColor,
        NamedAllocation, PortfolioResult, ReturnSeries,
    };
}

// Re-export commonly used types at crate root
pub use error::{PlaybookError, PlaybookResult};
pub use types::{AllocationScenario, AssetClass, PortfolioResult, ReturnSeries};
