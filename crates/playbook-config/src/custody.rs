//! Custody comparison configuration.

use std::collections::BTreeMap;

use playbook_core::types::{CustodyModel, CustodyScoreMatrix, SCORE_MAX, SCORE_MIN};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigResult, Validate, ValidationError};

/// Top-level keys a custody configuration must carry.
pub const CUSTODY_REQUIRED_KEYS: [&str; 3] = ["custody_models", "attributes", "scores"];

/// Custody models, comparison attributes and per-model scores.
///
/// ```json
/// {
///   "custody_models": ["Qualified Custodian"],
///   "attributes": ["Security Level", "Cost"],
///   "scores": { "Qualified Custodian": [4, 2] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyConfig {
    /// Models to compare, in display order.
    pub custody_models: Vec<String>,
    /// Attributes scored for every model, in display order.
    pub attributes: Vec<String>,
    /// Scores per model name, one per attribute.
    pub scores: BTreeMap<String, Vec<f64>>,
}

impl CustodyConfig {
    /// The built-in comparison of four custody setups.
    pub fn reference() -> Self {
        CustodyScoreMatrix::reference().into()
    }

    /// Converts the configuration into a validated score matrix.
    ///
    /// Models are taken in `custody_models` order, followed by any scored
    /// models missing from that list, in name order.
    ///
    /// # Errors
    ///
    /// Fails validation first, then on any domain-level violation.
    pub fn to_matrix(&self) -> ConfigResult<CustodyScoreMatrix> {
        self.validate_or_error()?;

        let listed = self.custody_models.iter().filter_map(|name| {
            self.scores.get(name).map(|scores| CustodyModel {
                name: name.clone(),
                scores: scores.clone(),
            })
        });
        let unlisted = self.unlisted_models().map(|(name, scores)| CustodyModel {
            name: name.clone(),
            scores: scores.clone(),
        });

        Ok(CustodyScoreMatrix::new(
            self.attributes.clone(),
            listed.chain(unlisted).collect(),
        )?)
    }

    /// Score entries whose model is not named in `custody_models`.
    pub fn unlisted_models(&self) -> impl Iterator<Item = (&String, &Vec<f64>)> + '_ {
        self.scores
            .iter()
            .filter(|(name, _)| !self.custody_models.contains(*name))
    }
}

impl From<CustodyScoreMatrix> for CustodyConfig {
    fn from(matrix: CustodyScoreMatrix) -> Self {
        Self {
            custody_models: matrix.models().iter().map(|m| m.name.clone()).collect(),
            attributes: matrix.attributes().to_vec(),
            scores: matrix
                .models()
                .iter()
                .map(|m| (m.name.clone(), m.scores.clone()))
                .collect(),
        }
    }
}

impl Validate for CustodyConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.custody_models.is_empty() {
            errors.push(ValidationError::new("custody_models", "must not be empty"));
        }
        if self.attributes.is_empty() {
            errors.push(ValidationError::new("attributes", "must not be empty"));
        }

        for model in &self.custody_models {
            if !self.scores.contains_key(model) {
                errors.push(ValidationError::new(
                    format!("scores.{model}"),
                    "scores missing for custody model",
                ));
            }
        }

        // Entries for unlisted models are checked too.
        for (model, scores) in &self.scores {
            if scores.len() != self.attributes.len() {
                errors.push(ValidationError::with_rule(
                    format!("scores.{model}"),
                    format!(
                        "{} scores do not match {} attributes",
                        scores.len(),
                        self.attributes.len()
                    ),
                    "length",
                ));
            }
            if let Some(bad) = scores
                .iter()
                .find(|s| !s.is_finite() || **s < SCORE_MIN || **s > SCORE_MAX)
            {
                errors.push(ValidationError::with_rule(
                    format!("scores.{model}"),
                    format!("score {bad} must be a number between {SCORE_MIN} and {SCORE_MAX}"),
                    "range",
                ));
            }
        }

        errors
    }
}
