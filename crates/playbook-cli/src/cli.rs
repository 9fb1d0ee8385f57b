//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BacktestArgs, ConfigArgs, CustodyArgs, ScenariosArgs, SharpeArgs};

/// Playbook - charts for corporate Bitcoin treasury allocation
#[derive(Parser)]
#[command(name = "playbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Cumulative returns of blended BTC/traditional portfolios
    Backtest(BacktestArgs),

    /// Monte Carlo fan chart of BTC allocations across market regimes
    Scenarios(ScenariosArgs),

    /// Heatmap comparing custody models
    Custody(CustodyArgs),

    /// Sharpe ratio bar chart and risk/return scatter
    Sharpe(SharpeArgs),

    /// Inspect and validate JSON configuration files
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (headline value only)
    Minimal,
}
