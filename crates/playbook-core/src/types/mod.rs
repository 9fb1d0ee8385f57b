//! Domain types for the treasury playbook.
//!
//! - [`AssetClass`]: Expected return and volatility of an asset
//! - [`AllocationScenario`]: BTC weight and the implied traditional weight
//! - [`ReturnSeries`]: Ordered period returns
//! - [`PortfolioResult`]: Cumulative value path from compounding
//! - [`CustodyScoreMatrix`]: Attribute scores per custody model
//! - [`HexColor`]: `#RRGGBB` display color

mod allocation;
mod asset;
mod color;
mod custody;
mod series;

pub use allocation::{AllocationScenario, NamedAllocation};
pub use asset::AssetClass;
pub use color::HexColor;
pub use custody::{CustodyModel, CustodyScoreMatrix, SCORE_MAX, SCORE_MIN};
pub use series::{PortfolioResult, ReturnSeries};
