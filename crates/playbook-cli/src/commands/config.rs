//! Config command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use playbook_config::ConfigKind;

use crate::cli::OutputFormat;
use crate::output::{print_info, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print (or write) the built-in configuration as JSON
    Example {
        /// Which configuration
        #[arg(value_enum)]
        kind: KindArg,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and validate a configuration file
    Validate {
        /// Which configuration
        #[arg(value_enum)]
        kind: KindArg,

        /// JSON file to check
        path: PathBuf,
    },
}

/// Configuration kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Custody heatmap configuration
    Custody,
    /// Sharpe dashboard configuration
    Sharpe,
}

impl From<KindArg> for ConfigKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Custody => ConfigKind::Custody,
            KindArg::Sharpe => ConfigKind::Sharpe,
        }
    }
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    match args.command {
        ConfigCommand::Example { kind, output } => {
            let kind = ConfigKind::from(kind);
            let json = kind.example_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, format!("{json}\n"))
                        .with_context(|| format!("writing {}", path.display()))?;
                    if !quiet {
                        print_info(&format!("Example {kind} config written to {}", path.display()));
                    }
                }
                None => println!("{json}"),
            }
        }
        ConfigCommand::Validate { kind, path } => {
            let kind = ConfigKind::from(kind);
            kind.check_file(&path)?;

            if format == OutputFormat::Table && !quiet {
                print_success(&format!("{} is a valid {kind} config", path.display()));
            }
            let details = vec![
                KeyValue::new("File", path.display().to_string()),
                KeyValue::new("Kind", kind.to_string()),
                KeyValue::new("Required Keys", kind.required_keys().join(", ")),
            ];
            print_output(&details, format, |_| "valid".to_string())?;
        }
    }

    Ok(())
}
