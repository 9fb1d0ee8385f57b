//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid risk-free rate.
    #[error("Invalid risk-free rate: {0}. Must be a finite fraction, e.g. 0.025.")]
    InvalidRiskFreeRate(f64),

    /// A count argument that must be positive was zero.
    #[error("Invalid {name}: must be at least 1")]
    ZeroCount {
        /// Argument name.
        name: &'static str,
    },

    /// Chart rendering failed.
    #[error("Rendering error: {0}")]
    Render(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Wraps a drawing-backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        CliError::Render(err.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
