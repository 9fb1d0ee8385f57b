//! Backtest command implementation.
//!
//! Compounds the four dashboard portfolios over shared monthly draws and
//! plots their cumulative values.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use playbook_core::backtest::{BacktestSpec, BacktestSummary, DEFAULT_SEED};
use playbook_core::synthesis::ReturnGenerator;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, validate_count, ChartOutput};
use crate::output::{
    format_percent, format_value, format_weight, print_header, print_output, report_chart,
};
use crate::render::{render_to_file, BacktestChart};

/// Default chart file.
pub const DEFAULT_OUTPUT: &str = "backtest_dashboard.png";

/// Arguments for the backtest command.
#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Random seed for the monthly return draws
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// First month of the window (YYYY-MM-DD, any day of the month)
    #[arg(long, default_value = "2020-01-01")]
    pub start: String,

    /// Number of monthly periods
    #[arg(long, default_value_t = 60)]
    pub periods: usize,

    #[command(flatten)]
    pub chart: ChartOutput,
}

/// One portfolio line of the backtest summary.
#[derive(Debug, Serialize, Tabled)]
pub struct BacktestRow {
    #[tabled(rename = "Portfolio")]
    pub portfolio: String,
    #[tabled(rename = "BTC", display_with = "format_weight")]
    pub btc_weight: f64,
    #[tabled(rename = "Final Value", display_with = "format_value")]
    pub final_value: f64,
    #[tabled(rename = "Total Return", display_with = "format_percent")]
    pub total_return: f64,
    #[tabled(rename = "CAGR", display_with = "format_percent")]
    pub annualized_return: f64,
    #[tabled(rename = "Max Drawdown", display_with = "format_percent")]
    pub max_drawdown: f64,
}

impl From<BacktestSummary> for BacktestRow {
    fn from(s: BacktestSummary) -> Self {
        Self {
            portfolio: s.portfolio,
            btc_weight: s.btc_weight,
            final_value: s.final_value,
            total_return: s.total_return,
            annualized_return: s.annualized_return,
            max_drawdown: s.max_drawdown,
        }
    }
}

/// Execute the backtest command.
pub fn execute(args: BacktestArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let spec = BacktestSpec {
        start: parse_date(&args.start)?,
        periods: validate_count("periods", args.periods)?,
        ..BacktestSpec::default()
    };
    debug!(seed = args.seed, start = %spec.start, periods = spec.periods, "running backtest");

    let report = spec.run(&mut ReturnGenerator::seeded(args.seed))?;

    if let Some(path) = args.chart.target(DEFAULT_OUTPUT) {
        render_to_file(&BacktestChart::new(&report), &path)?;
        report_chart(&path, quiet);
    }

    let rows: Vec<BacktestRow> = report.summaries().into_iter().map(Into::into).collect();

    if format == OutputFormat::Table && !quiet {
        if let Some((first, last)) = report.date_range() {
            print_header(&format!("Backtest Dashboard ({first} to {last}, seed {})", args.seed));
        }
    }
    print_output(&rows, format, |r| format_value(&r.final_value))?;

    Ok(())
}
