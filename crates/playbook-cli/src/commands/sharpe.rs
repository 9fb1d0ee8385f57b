//! Sharpe command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use playbook_config::{load_sharpe_config, SharpeConfig};
use playbook_core::sharpe::{rank_by_sharpe, SharpeRow};

use crate::cli::OutputFormat;
use crate::commands::{validate_risk_free_rate, ChartOutput};
use crate::output::{format_percent, format_ratio, print_header, print_output, report_chart};
use crate::render::{render_to_file, SharpeDashboard};

/// Default chart file.
pub const DEFAULT_OUTPUT: &str = "sharpe_ratio_comparison.png";

/// Arguments for the sharpe command.
#[derive(Args, Debug)]
pub struct SharpeArgs {
    /// JSON file with risk_free_rate, plot_style and asset_classes
    /// (built-in five-asset comparison when omitted)
    #[arg(short, long, env = "PLAYBOOK_SHARPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the risk-free rate as a fraction (e.g., 0.025 or -0.01)
    #[arg(short, long, allow_negative_numbers = true)]
    pub risk_free_rate: Option<f64>,

    #[command(flatten)]
    pub chart: ChartOutput,
}

/// One ranked asset class.
#[derive(Debug, Serialize, Tabled)]
pub struct SharpeTableRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Sharpe", display_with = "format_ratio")]
    pub sharpe: f64,
    #[tabled(rename = "Return", display_with = "format_percent")]
    pub annual_return: f64,
    #[tabled(rename = "Volatility", display_with = "format_percent")]
    pub annual_volatility: f64,
}

impl SharpeTableRow {
    fn ranked(rows: &[SharpeRow]) -> Vec<Self> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| Self {
                rank: i + 1,
                asset: row.name.clone(),
                sharpe: row.sharpe,
                annual_return: row.annual_return,
                annual_volatility: row.annual_volatility,
            })
            .collect()
    }
}

/// Execute the sharpe command.
pub fn execute(args: SharpeArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_sharpe_config(path)?,
        None => SharpeConfig::reference(),
    };
    if let Some(rate) = args.risk_free_rate {
        config.risk_free_rate = validate_risk_free_rate(rate)?;
    }
    debug!(risk_free_rate = config.risk_free_rate, "ranking asset classes");

    let rows = rank_by_sharpe(&config.assets(), config.risk_free_rate)?;

    if let Some(path) = args.chart.target(DEFAULT_OUTPUT) {
        let dashboard = SharpeDashboard::new(&rows, config.risk_free_rate, &config.plot_style);
        render_to_file(&dashboard, &path)?;
        report_chart(&path, quiet);
    }

    if format == OutputFormat::Table && !quiet {
        print_header(&format!(
            "Sharpe Ratio Ranking (risk-free rate {})",
            format_percent(&config.risk_free_rate)
        ));
    }
    print_output(&SharpeTableRow::ranked(&rows), format, |r| {
        format!("{} {}", r.asset, format_ratio(&r.sharpe))
    })?;

    Ok(())
}
