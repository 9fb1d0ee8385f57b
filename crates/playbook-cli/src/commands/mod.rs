//! CLI command implementations.

pub mod backtest;
pub mod config;
pub mod custody;
pub mod scenarios;
pub mod sharpe;

// Re-export submodules for convenience
pub use backtest::BacktestArgs;
pub use config::ConfigArgs;
pub use custody::CustodyArgs;
pub use scenarios::ScenariosArgs;
pub use sharpe::SharpeArgs;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::error::{CliError, CliResult};

/// Chart destination flags shared by every chart command.
#[derive(Args, Debug, Clone)]
pub struct ChartOutput {
    /// Image file to write (.svg for vector output, PNG otherwise)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the summary without rendering a chart
    #[arg(long)]
    pub no_chart: bool,
}

impl ChartOutput {
    /// The chart path, or `None` when rendering is disabled.
    pub fn target(&self, default_file: &str) -> Option<PathBuf> {
        if self.no_chart {
            None
        } else {
            Some(
                self.output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(default_file)),
            )
        }
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Validates a risk-free rate given as a fraction.
pub fn validate_risk_free_rate(rate: f64) -> CliResult<f64> {
    if !rate.is_finite() || !(-1.0..=1.0).contains(&rate) {
        return Err(CliError::InvalidRiskFreeRate(rate));
    }
    Ok(rate)
}

/// Validates that a count argument is positive.
pub fn validate_count(name: &'static str, value: usize) -> CliResult<usize> {
    if value == 0 {
        return Err(CliError::ZeroCount { name });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2020-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        assert!(matches!(parse_date("01/01/2020"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_validators() {
        assert_eq!(validate_risk_free_rate(0.025).unwrap(), 0.025);
        assert!(validate_risk_free_rate(f64::NAN).is_err());
        assert!(validate_risk_free_rate(2.5).is_err());
        assert!(validate_count("simulations", 0).is_err());
        assert_eq!(validate_count("horizon", 5).unwrap(), 5);
    }

    #[test]
    fn test_chart_target() {
        let out = ChartOutput {
            output: None,
            no_chart: false,
        };
        assert_eq!(out.target("a.png"), Some(PathBuf::from("a.png")));

        let out = ChartOutput {
            output: Some(PathBuf::from("b.svg")),
            no_chart: true,
        };
        assert_eq!(out.target("a.png"), None);
    }
}
