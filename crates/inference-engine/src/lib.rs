//! Churn Inference Engine
//!
//! Scores schema-aligned feature rows with a trained binary classifier.

mod classifier;
mod engine;
mod logistic;
mod onnx;

pub use classifier::{ClassScores, Classifier};
pub use engine::{predict, ChurnLabel, PredictionResult};
pub use logistic::LogisticClassifier;
pub use onnx::OnnxClassifier;

use feature_engine::FeatureError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Feature building failed: {0}")]
    Features(#[from] FeatureError),
}
