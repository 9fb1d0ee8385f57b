//! Scenarios command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use playbook_core::monte_carlo::{ScenarioSpec, ScenarioSummary};
use playbook_core::synthesis::ReturnGenerator;

use crate::cli::OutputFormat;
use crate::commands::{validate_count, ChartOutput};
use crate::output::{
    format_percent, format_value, format_weight, print_divider, print_header, print_info,
    print_output, report_chart,
};
use crate::render::{render_to_file, FanChart};

/// Default chart file.
pub const DEFAULT_OUTPUT: &str = "btc_allocation_scenarios.png";

/// Arguments for the scenarios command.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Random seed (fresh entropy per run when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated paths per scenario and allocation
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub simulations: usize,

    /// Horizon in years
    #[arg(long, default_value_t = 5)]
    pub horizon: usize,

    #[command(flatten)]
    pub chart: ChartOutput,
}

/// Terminal-value statistics for one regime and allocation.
#[derive(Debug, Serialize, Tabled)]
pub struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    pub scenario: String,
    #[tabled(rename = "BTC", display_with = "format_weight")]
    pub btc_weight: f64,
    #[tabled(rename = "Mean", display_with = "format_value")]
    pub mean_terminal: f64,
    #[tabled(rename = "Median", display_with = "format_value")]
    pub median_terminal: f64,
    #[tabled(rename = "P5", display_with = "format_value")]
    pub p5_terminal: f64,
    #[tabled(rename = "P95", display_with = "format_value")]
    pub p95_terminal: f64,
    #[tabled(rename = "P(Loss)", display_with = "format_percent")]
    pub probability_of_loss: f64,
}

impl From<ScenarioSummary> for ScenarioRow {
    fn from(s: ScenarioSummary) -> Self {
        Self {
            scenario: s.scenario,
            btc_weight: s.btc_weight,
            mean_terminal: s.mean_terminal,
            median_terminal: s.median_terminal,
            p5_terminal: s.p5_terminal,
            p95_terminal: s.p95_terminal,
            probability_of_loss: s.probability_of_loss,
        }
    }
}

/// Execute the scenarios command.
pub fn execute(args: ScenariosArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let spec = ScenarioSpec {
        simulations: validate_count("simulations", args.simulations)?,
        horizon_years: validate_count("horizon", args.horizon)?,
        ..ScenarioSpec::default()
    };

    let mut generator = ReturnGenerator::from_option(args.seed);
    let outcomes = spec.run(&mut generator)?;
    info!(
        outcomes = outcomes.len(),
        seeded = generator.seed().is_some(),
        "simulation complete"
    );

    if let Some(path) = args.chart.target(DEFAULT_OUTPUT) {
        let chart = FanChart::new(&outcomes);
        debug!(panels = chart.panel_count(), "drawing fan chart");
        render_to_file(&chart, &path)?;
        report_chart(&path, quiet);
    }

    let rows: Vec<ScenarioRow> = outcomes.iter().map(|o| o.summary().into()).collect();

    if format == OutputFormat::Table && !quiet {
        print_header(&format!(
            "Monte Carlo Outcomes ({} paths, {}-year horizon)",
            spec.simulations, spec.horizon_years
        ));
        if args.seed.is_none() {
            print_info("Unseeded run: pass --seed for reproducible results");
        }
        print_divider();
    }
    print_output(&rows, format, |r| format_value(&r.median_terminal))?;

    Ok(())
}
