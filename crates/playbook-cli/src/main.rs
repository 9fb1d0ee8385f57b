//! Playbook CLI - illustrative charts for corporate Bitcoin treasury allocation.
//!
//! # Usage
//!
//! ```bash
//! # Backtest dashboard of four blended portfolios
//! playbook backtest --seed 42
//!
//! # Monte Carlo fan chart across bear, base and bull markets
//! playbook scenarios --simulations 1000 --horizon 5
//!
//! # Custody heatmap from a JSON file
//! playbook custody --config custody_config.json
//!
//! # Sharpe ratio dashboard as SVG
//! playbook sharpe --output sharpe.svg
//!
//! # Starter config files
//! playbook config example sharpe > config.json
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod render;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error generating visualization: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Backtest(args) => commands::backtest::execute(args, format, quiet)?,
        Commands::Scenarios(args) => commands::scenarios::execute(args, format, quiet)?,
        Commands::Custody(args) => commands::custody::execute(args, format, quiet)?,
        Commands::Sharpe(args) => commands::sharpe::execute(args, format, quiet)?,
        Commands::Config(args) => commands::config::execute(args, format, quiet)?,
    }

    Ok(())
}
