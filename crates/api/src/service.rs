//! Churn Inference Service

use artifact_store::ArtifactBundle;
use feature_engine::{FeatureBuilder, RawCustomerRecord};
use inference_engine::{predict, InferenceError, PredictionResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Feature building and scoring behind one call
#[derive(Debug, Clone)]
pub struct ChurnService {
    artifacts: Arc<ArtifactBundle>,
}

impl ChurnService {
    /// Create a service over loaded artifacts
    pub fn new(artifacts: Arc<ArtifactBundle>) -> Self {
        Self { artifacts }
    }

    /// Loaded artifacts
    pub fn artifacts(&self) -> &ArtifactBundle {
        &self.artifacts
    }

    /// Predict churn for one record
    pub fn predict_churn(&self, raw: &RawCustomerRecord) -> Result<PredictionResult, InferenceError> {
        let start = Instant::now();

        let outcome = FeatureBuilder::build(raw, self.artifacts.schema(), self.artifacts.scaler())
            .map_err(InferenceError::from)
            .and_then(|row| predict(&row, self.artifacts.classifier()));

        let elapsed = start.elapsed();
        metrics::histogram!("churn_inference_duration_seconds").record(elapsed.as_secs_f64());

        match &outcome {
            Ok(result) => {
                metrics::counter!("churn_predictions_total", "prediction" => result.prediction.as_str())
                    .increment(1);
                debug!(
                    "Scored record: {} ({:.2}%) in {}us",
                    result.prediction.as_str(),
                    result.probability,
                    elapsed.as_micros()
                );
            }
            Err(e) => {
                metrics::counter!("churn_prediction_errors_total").increment(1);
                warn!("Inference error: {}", e);
            }
        }

        outcome
    }
}
