//! ONNX Classifier
//!
//! Runs an sklearn classifier exported with skl2onnx (`zipmap=False`) through
//! tract. Output 0 is the int64 label tensor, output 1 the `[1, 2]` float
//! probability tensor.

use crate::classifier::{ClassScores, Classifier};
use crate::InferenceError;
use std::path::Path;
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// Optimized tract plan for a single-row classifier
pub struct OnnxClassifier {
    /// Runnable model
    plan: TypedRunnableModel<TypedModel>,
    /// Width of the input row
    input_dim: usize,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX model with a fixed `[1, input_dim]` input
    pub fn load(path: &Path, input_dim: usize) -> Result<Self, InferenceError> {
        info!("Loading ONNX model {} (input width {})", path.display(), input_dim);

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, input_dim]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {:#}", path.display(), e)))?;

        info!("Model loaded successfully");
        Ok(Self { plan, input_dim })
    }

    fn run(&self, features: &[f64]) -> Result<(i64, f64), InferenceError> {
        let failed = |e: TractError| InferenceError::InferenceFailed(format!("{:#}", e));

        let values: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, values.len()], &values).map_err(failed)?;
        let outputs = self.plan.run(tvec!(input.into())).map_err(failed)?;

        if outputs.len() < 2 {
            return Err(InferenceError::InferenceFailed(format!(
                "expected label and probability outputs, got {}",
                outputs.len()
            )));
        }

        let label = outputs[0]
            .to_array_view::<i64>()
            .map_err(failed)?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::InferenceFailed("empty label output".to_string()))?;

        let probability = outputs[1]
            .to_array_view::<f32>()
            .map_err(failed)?
            .iter()
            .nth(1)
            .copied()
            .ok_or_else(|| {
                InferenceError::InferenceFailed("probability output has no positive class".to_string())
            })?;

        Ok((label, f64::from(probability)))
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.input_dim)
    }

    fn score(&self, features: &[f64]) -> Result<ClassScores, InferenceError> {
        if features.len() != self.input_dim {
            return Err(InferenceError::InvalidInputShape {
                expected: self.input_dim,
                actual: features.len(),
            });
        }

        let (class, positive_probability) = self.run(features)?;
        debug!("ONNX label={} p={:.4}", class, positive_probability);

        Ok(ClassScores {
            class,
            positive_probability,
        })
    }
}
