//! Output formatting utilities.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
///
/// `Minimal` prints only the headline value returned by `headline` for the
/// first row.
pub fn print_output<T, F>(data: &[T], format: OutputFormat, headline: F) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
    F: Fn(&T) -> String,
{
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => {
            if let Some(first) = data.first() {
                println!("{}", headline(first));
            }
            Ok(())
        }
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a fraction as a percentage string.
pub fn format_percent(value: &f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Formats a fraction as a whole-number allocation, e.g. `5%`.
pub fn format_weight(value: &f64) -> String {
    format!("{}%", (value * 1000.0).round() / 10.0)
}

/// Formats a value with four decimals.
pub fn format_ratio(value: &f64) -> String {
    format!("{:.4}", value)
}

/// Formats a normalized portfolio value.
pub fn format_value(value: &f64) -> String {
    format!("{:.3}", value)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Reports a written chart unless quiet.
pub fn report_chart(path: &Path, quiet: bool) {
    if !quiet {
        print_success(&format!("Chart written to {}", path.display()));
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(60).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatters() {
        assert_eq!(format_percent(&0.0525), "5.25%");
        assert_eq!(format_weight(&0.05), "5%");
        assert_eq!(format_weight(&0.025), "2.5%");
        assert_eq!(format_ratio(&0.607_692), "0.6077");
        assert_eq!(format_value(&1.0659), "1.066");
    }
}
