//! Error types for the playbook computations.

use thiserror::Error;

/// A specialized Result type for playbook operations.
pub type PlaybookResult<T> = Result<T, PlaybookError>;

/// The main error type for playbook computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybookError {
    /// Volatility must be strictly positive and finite.
    #[error("Volatility for {name} must be positive, got {value}")]
    InvalidVolatility {
        /// Asset or series the volatility belongs to.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Allocation weight outside `[0, 1]`.
    #[error("Invalid BTC weight: {weight} (must be within [0, 1])")]
    InvalidWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// Number of weights does not match the number of series.
    #[error("Weight count mismatch: {series} series vs {weights} weights")]
    WeightMismatch {
        /// Number of return series supplied.
        series: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// Return series of different lengths cannot be blended.
    #[error("Series length mismatch: expected {expected} periods, got {actual}")]
    LengthMismatch {
        /// Length of the first series.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },

    /// An operation needed at least one element.
    #[error("Empty input: {what}")]
    EmptyInput {
        /// What was empty.
        what: String,
    },

    /// Custody scores violate the matrix invariants.
    #[error("Invalid scores for {model}: {reason}")]
    InvalidScores {
        /// The custody model whose scores are invalid.
        model: String,
        /// Description of the violation.
        reason: String,
    },

    /// Invalid color literal.
    #[error("Invalid color '{value}': expected #RRGGBB")]
    InvalidColor {
        /// The rejected literal.
        value: String,
    },

    /// Return distribution could not be built.
    #[error("Distribution error for {name}: {reason}")]
    Distribution {
        /// Asset or series being sampled.
        name: String,
        /// Description of the failure.
        reason: String,
    },

    /// Any other out-of-range parameter.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Reason for invalidity.
        reason: String,
    },
}

impl PlaybookError {
    /// Creates an invalid volatility error.
    #[must_use]
    pub fn invalid_volatility(name: impl Into<String>, value: f64) -> Self {
        Self::InvalidVolatility {
            name: name.into(),
            value,
        }
    }

    /// Creates an empty input error.
    #[must_use]
    pub fn empty(what: impl Into<String>) -> Self {
        Self::EmptyInput { what: what.into() }
    }

    /// Creates an invalid scores error.
    #[must_use]
    pub fn invalid_scores(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScores {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Creates a distribution error.
    #[must_use]
    pub fn distribution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Distribution {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlaybookError::invalid_volatility("Bitcoin", 0.0);
        assert_eq!(err.to_string(), "Volatility for Bitcoin must be positive, got 0");

        let err = PlaybookError::WeightMismatch {
            series: 2,
            weights: 3,
        };
        assert!(err.to_string().contains("2 series vs 3 weights"));

        let err = PlaybookError::distribution("Bitcoin", "mean must be finite");
        assert_eq!(err.to_string(), "Distribution error for Bitcoin: mean must be finite");
    }
}
