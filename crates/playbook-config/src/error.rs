//! Configuration error types.

use std::path::PathBuf;

use playbook_core::PlaybookError;
use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file {} not found", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the expected shape.
    #[error("Invalid JSON in {}: {message}", .path.display())]
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Parser message, including line and column.
        message: String,
    },

    /// One or more required top-level keys are absent.
    #[error("Config file missing required keys: {}", format_keys(.required))]
    MissingKeys {
        /// Every key the configuration must carry.
        required: Vec<String>,
        /// The keys that were absent.
        missing: Vec<String>,
    },

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", format_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Domain error raised while converting a configuration.
    #[error(transparent)]
    Domain(#[from] PlaybookError),
}

impl ConfigError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_keys(keys: &[String]) -> String {
    format!("[{}]", keys.join(", "))
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns every violation found, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    ///
    /// # Errors
    ///
    /// A single violation becomes `ConfigError::Validation`, several become
    /// `ConfigError::MultipleValidationErrors`.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        if errors.len() > 1 {
            return Err(ConfigError::MultipleValidationErrors(errors));
        }
        match errors.pop() {
            None => Ok(()),
            Some(err) => Err(ConfigError::Validation {
                field: err.field,
                message: err.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<ValidationError>);

    impl Validate for Fixed {
        fn validate(&self) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_validate_or_error() {
        assert!(Fixed(vec![]).validate_or_error().is_ok());

        let one = Fixed(vec![ValidationError::new("risk_free_rate", "must be finite")]);
        assert!(matches!(
            one.validate_or_error(),
            Err(ConfigError::Validation { ref field, .. }) if field == "risk_free_rate"
        ));

        let two = Fixed(vec![
            ValidationError::new("a", "bad"),
            ValidationError::with_rule("b", "worse", "range"),
        ]);
        match two.validate_or_error() {
            Err(ConfigError::MultipleValidationErrors(errs)) => assert_eq!(errs.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let err = ValidationError::with_rule("scores.Exchange Custody", "out of range", "1..=5");
        assert_eq!(
            err.to_string(),
            "scores.Exchange Custody: out of range (rule: 1..=5)"
        );

        let err = ConfigError::MissingKeys {
            required: vec!["custody_models".into(), "attributes".into()],
            missing: vec!["attributes".into()],
        };
        assert_eq!(
            err.to_string(),
            "Config file missing required keys: [custody_models, attributes]"
        );

        let err = ConfigError::NotFound {
            path: PathBuf::from("custody_config.json"),
        };
        assert_eq!(err.to_string(), "Configuration file custody_config.json not found");
    }
}
