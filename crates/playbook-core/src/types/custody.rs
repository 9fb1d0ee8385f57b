//! Custody model comparison scores.

use serde::{Deserialize, Serialize};

use crate::error::{PlaybookError, PlaybookResult};

/// Lowest (worst) attribute score.
pub const SCORE_MIN: f64 = 1.0;

/// Highest (best) attribute score.
pub const SCORE_MAX: f64 = 5.0;

/// One custody model and its score per attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyModel {
    /// Model name, e.g. `Qualified Custodian`.
    pub name: String,
    /// Scores in attribute order.
    pub scores: Vec<f64>,
}

/// Scores of several custody models across a shared attribute list.
///
/// Invariants, checked on construction:
/// - every model has exactly one score per attribute,
/// - every score lies within [`SCORE_MIN`, `SCORE_MAX`].
///
/// # Example
///
/// ```rust
/// use playbook_core::types::{CustodyModel, CustodyScoreMatrix};
///
/// let matrix = CustodyScoreMatrix::new(
///     vec!["Security".into(), "Cost".into()],
///     vec![CustodyModel { name: "Self-Custody".into(), scores: vec![5.0, 5.0] }],
/// )
/// .unwrap();
/// assert_eq!(matrix.score(0, 1), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustodyScoreMatrix {
    attributes: Vec<String>,
    models: Vec<CustodyModel>,
}

impl CustodyScoreMatrix {
    /// Builds a matrix, validating every score sequence.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidScores` for a length mismatch or an
    /// out-of-range score, and `PlaybookError::EmptyInput` when there are no
    /// attributes or no models.
    pub fn new(attributes: Vec<String>, models: Vec<CustodyModel>) -> PlaybookResult<Self> {
        if attributes.is_empty() {
            return Err(PlaybookError::empty("custody attributes"));
        }
        if models.is_empty() {
            return Err(PlaybookError::empty("custody models"));
        }

        for model in &models {
            Self::check_scores(&model.name, &model.scores, attributes.len())?;
        }

        Ok(Self { attributes, models })
    }

    /// Checks a single score sequence against the matrix invariants.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidScores` describing the first violation.
    pub fn check_scores(model: &str, scores: &[f64], attribute_count: usize) -> PlaybookResult<()> {
        if scores.len() != attribute_count {
            return Err(PlaybookError::invalid_scores(
                model,
                format!(
                    "{} scores do not match {} attributes",
                    scores.len(),
                    attribute_count
                ),
            ));
        }
        if let Some(bad) = scores
            .iter()
            .find(|s| !s.is_finite() || **s < SCORE_MIN || **s > SCORE_MAX)
        {
            return Err(PlaybookError::invalid_scores(
                model,
                format!("score {bad} is outside [{SCORE_MIN}, {SCORE_MAX}]"),
            ));
        }
        Ok(())
    }

    /// The reference comparison of four common custody setups.
    pub fn reference() -> Self {
        let attributes = [
            "Security Level",
            "Cost",
            "Access Speed",
            "Regulatory Compliance",
            "Insurance Coverage",
            "Operational Complexity",
        ]
        .map(String::from)
        .to_vec();

        let models = [
            ("Self-Custody (Cold Storage)", [5.0, 5.0, 2.0, 3.0, 1.0, 2.0]),
            ("Qualified Custodian", [4.0, 2.0, 3.0, 5.0, 5.0, 4.0]),
            ("Exchange Custody", [2.0, 4.0, 5.0, 3.0, 3.0, 5.0]),
            ("Multi-Signature Solution", [4.0, 3.0, 3.0, 4.0, 3.0, 3.0]),
        ]
        .into_iter()
        .map(|(name, scores)| CustodyModel {
            name: name.to_string(),
            scores: scores.to_vec(),
        })
        .collect();

        Self { attributes, models }
    }

    /// Attribute names (heatmap rows).
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Custody models (heatmap columns).
    pub fn models(&self) -> &[CustodyModel] {
        &self.models
    }

    /// Score of `model` for `attribute`, both by index.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn score(&self, model: usize, attribute: usize) -> f64 {
        self.models[model].scores[attribute]
    }

    /// Mean score per model, in model order.
    pub fn average_scores(&self) -> Vec<(String, f64)> {
        self.models
            .iter()
            .map(|m| {
                let mean = m.scores.iter().sum::<f64>() / m.scores.len() as f64;
                (m.name.clone(), mean)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, scores: &[f64]) -> CustodyModel {
        CustodyModel {
            name: name.to_string(),
            scores: scores.to_vec(),
        }
    }

    #[test]
    fn test_reference_is_valid() {
        let reference = CustodyScoreMatrix::reference();
        let rebuilt =
            CustodyScoreMatrix::new(reference.attributes().to_vec(), reference.models().to_vec());
        assert_eq!(rebuilt.unwrap(), reference);
        assert_eq!(reference.score(1, 3), 5.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = CustodyScoreMatrix::new(
            vec!["A".into(), "B".into()],
            vec![model("Exchange", &[3.0])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn test_out_of_range() {
        for bad in [0.0, 5.5, f64::NAN] {
            let result = CustodyScoreMatrix::new(vec!["A".into()], vec![model("X", &[bad])]);
            assert!(matches!(result, Err(PlaybookError::InvalidScores { .. })));
        }
    }

    #[test]
    fn test_empty() {
        assert!(CustodyScoreMatrix::new(vec![], vec![model("X", &[])]).is_err());
        assert!(CustodyScoreMatrix::new(vec!["A".into()], vec![]).is_err());
    }

    #[test]
    fn test_average_scores() {
        let averages = CustodyScoreMatrix::reference().average_scores();
        assert_eq!(averages[0].0, "Self-Custody (Cold Storage)");
        assert!((averages[0].1 - 3.0).abs() < 1e-12);
        assert!((averages[3].1 - 20.0 / 6.0).abs() < 1e-12);
    }
}
