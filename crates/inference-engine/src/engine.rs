//! Churn Prediction

use crate::classifier::Classifier;
use crate::InferenceError;
use feature_engine::ScaledFeatureRow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Churn decision reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    /// Customer is predicted to churn
    Yes,
    /// Customer is predicted to stay
    No,
}

impl ChurnLabel {
    /// Map a classifier class index
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(ChurnLabel::Yes),
            0 => Some(ChurnLabel::No),
            _ => None,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::Yes => "Yes",
            ChurnLabel::No => "No",
        }
    }
}

/// Prediction returned by the service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Churn decision
    pub prediction: ChurnLabel,
    /// Churn probability in percent, rounded to 2 decimals
    pub probability: f64,
}

fn round_percent(p: f64) -> f64 {
    (p * 100.0 * 100.0).round() / 100.0
}

/// Score a scaled row.
///
/// The row width is checked against the classifier before scoring so that a
/// drifted schema surfaces as `InvalidInputShape` instead of a model error.
pub fn predict(
    row: &ScaledFeatureRow,
    classifier: &dyn Classifier,
) -> Result<PredictionResult, InferenceError> {
    if let Some(expected) = classifier.input_dim() {
        if row.len() != expected {
            return Err(InferenceError::InvalidInputShape {
                expected,
                actual: row.len(),
            });
        }
    }

    let scores = classifier.score(row.values())?;

    let prediction = ChurnLabel::from_class(scores.class).ok_or_else(|| {
        InferenceError::InferenceFailed(format!("unexpected class index {}", scores.class))
    })?;

    let p = scores.positive_probability;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(InferenceError::InferenceFailed(format!(
            "positive-class probability {} outside [0, 1]",
            p
        )));
    }

    debug!(
        "Prediction: {} (p={:.4}, model={})",
        prediction.as_str(),
        p,
        classifier.name()
    );

    Ok(PredictionResult {
        prediction,
        probability: round_percent(p),
    })
}
