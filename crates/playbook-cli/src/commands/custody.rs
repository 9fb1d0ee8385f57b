//! Custody command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use playbook_config::{load_custody_config, CustodyConfig};
use playbook_core::types::CustodyScoreMatrix;

use crate::cli::OutputFormat;
use crate::commands::ChartOutput;
use crate::output::{format_value, print_header, print_output, print_warning, report_chart};
use crate::render::{render_to_file, CustodyHeatmap};

/// Default chart file.
pub const DEFAULT_OUTPUT: &str = "custody_model_comparison.png";

/// Arguments for the custody command.
#[derive(Args, Debug)]
pub struct CustodyArgs {
    /// JSON file with custody_models, attributes and scores (built-in
    /// comparison when omitted)
    #[arg(short, long, env = "PLAYBOOK_CUSTODY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub chart: ChartOutput,
}

/// Summary of one custody model across all attributes.
#[derive(Debug, Serialize, Tabled)]
pub struct CustodyRow {
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Average", display_with = "format_value")]
    pub average: f64,
    #[tabled(rename = "Strongest")]
    pub strongest: String,
    #[tabled(rename = "Weakest")]
    pub weakest: String,
}

fn rows(matrix: &CustodyScoreMatrix) -> Vec<CustodyRow> {
    let attributes = matrix.attributes();
    let pick = |scores: &[f64], better: fn(f64, f64) -> bool| {
        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if better(*score, scores[best]) {
                best = i;
            }
        }
        attributes.get(best).cloned().unwrap_or_default()
    };

    matrix
        .models()
        .iter()
        .zip(matrix.average_scores())
        .map(|(model, (name, average))| CustodyRow {
            model: name,
            average,
            strongest: pick(&model.scores, |a, b| a > b),
            weakest: pick(&model.scores, |a, b| a < b),
        })
        .collect()
}

/// Execute the custody command.
pub fn execute(args: CustodyArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_custody_config(path)?,
        None => CustodyConfig::reference(),
    };

    for (name, _) in config.unlisted_models() {
        print_warning(&format!(
            "Custody model '{name}' is scored but not listed; shown after the listed models"
        ));
    }

    let matrix = config.to_matrix()?;

    if let Some(path) = args.chart.target(DEFAULT_OUTPUT) {
        render_to_file(&CustodyHeatmap::new(&matrix), &path)?;
        report_chart(&path, quiet);
    }

    if format == OutputFormat::Table && !quiet {
        print_header(&format!(
            "Custody Model Comparison ({} models, {} attributes)",
            matrix.models().len(),
            matrix.attributes().len()
        ));
    }
    print_output(&rows(&matrix), format, |r| r.model.clone())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_pick_extremes() {
        let matrix = CustodyScoreMatrix::new(
            vec!["Security".into(), "Cost".into(), "Control".into()],
            vec![playbook_core::types::CustodyModel {
                name: "Self-Custody".into(),
                scores: vec![4.0, 5.0, 1.0],
            }],
        )
        .unwrap();

        let rows = rows(&matrix);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].strongest, "Cost");
        assert_eq!(rows[0].weakest, "Control");
        assert!((rows[0].average - 10.0 / 3.0).abs() < 1e-12);
    }
}
