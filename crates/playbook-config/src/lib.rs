//! Playbook Configuration Layer
//!
//! This crate loads and validates the JSON files that drive the custody
//! heatmap and the Sharpe dashboard.
//!
//! # Features
//!
//! - **Custody Configuration**: custody models, attributes and 1-5 scores
//! - **Sharpe Configuration**: risk-free rate, asset classes, plot style
//! - **Required Keys**: missing top-level keys are reported together
//! - **Validation**: every violation is collected through the [`Validate`] trait
//!
//! # Example
//!
//! ```rust
//! use playbook_config::{CustodyConfig, SharpeConfig, Validate};
//!
//! let custody = CustodyConfig::reference();
//! assert!(custody.is_valid());
//! assert_eq!(custody.to_matrix().unwrap().models().len(), 4);
//!
//! let sharpe = SharpeConfig::reference();
//! assert_eq!(sharpe.plot_style.figure_size, [12.0, 12.0]);
//! assert_eq!(sharpe.assets().len(), 5);
//! ```
//!
//! # File Formats
//!
//! Custody:
//!
//! ```json
//! {
//!   "custody_models": ["Qualified Custodian", "Exchange Custody"],
//!   "attributes": ["Security Level", "Cost"],
//!   "scores": {
//!     "Qualified Custodian": [4, 2],
//!     "Exchange Custody": [2, 4]
//!   }
//! }
//! ```
//!
//! Sharpe:
//!
//! ```json
//! {
//!   "risk_free_rate": 0.025,
//!   "plot_style": { "figure_size": [12, 12], "title_font_size": 16 },
//!   "asset_classes": {
//!     "Bitcoin": { "color": "#F7931A", "return": 0.42, "volatility": 0.65 }
//!   }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

mod custody;
mod error;
mod loader;
mod sharpe;

pub use custody::{CustodyConfig, CUSTODY_REQUIRED_KEYS};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use loader::{
    load_config, load_custody_config, load_sharpe_config, read_json, require_keys,
    to_json_pretty, ConfigKind,
};
pub use sharpe::{AssetEntry, PlotStyle, SharpeConfig, DEFAULT_PALETTE, SHARPE_REQUIRED_KEYS};
