//! Logistic Regression Classifier
//!
//! Portable JSON form of a fitted linear model:
//! `{"kind": "logistic", "intercept": f, "coefficients": [..], "feature_names": [..]}`.

use crate::classifier::{ClassScores, Classifier};
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Fitted logistic regression over the reference columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    /// Bias term
    pub intercept: f64,
    /// One weight per input column
    pub coefficients: Vec<f64>,
    /// Columns the weights were fitted on
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelFile {
    Logistic(LogisticClassifier),
}

impl LogisticClassifier {
    /// Create a classifier from raw weights
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
            feature_names: None,
        }
    }

    /// Parse a model document
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let ModelFile::Logistic(model) = serde_json::from_str::<ModelFile>(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("invalid logistic model: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model document from disk
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
        let model = Self::from_json(&json)?;
        info!(
            "Loaded logistic model from {} ({} coefficients)",
            path.display(),
            model.coefficients.len()
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), InferenceError> {
        if self.coefficients.is_empty() {
            return Err(InferenceError::ModelLoadError("model has no coefficients".to_string()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(InferenceError::ModelLoadError("non-finite model weight".to_string()));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(InferenceError::ModelLoadError(format!(
                    "{} feature names for {} coefficients",
                    names.len(),
                    self.coefficients.len()
                )));
            }
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        "logistic"
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn score(&self, features: &[f64]) -> Result<ClassScores, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = sigmoid(z);

        // argmax over [1 - p, p] keeps class 0 on a tie
        Ok(ClassScores {
            class: i64::from(p > 0.5),
            positive_probability: p,
        })
    }
}
