//! Artifact Bundle

use crate::{ArtifactError, ArtifactPaths};
use feature_engine::{check_scaler_columns, ReferenceColumns, Scaler};
use inference_engine::{Classifier, InferenceError, LogisticClassifier, OnnxClassifier};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Immutable set of artifacts shared by every request
pub struct ArtifactBundle {
    schema: ReferenceColumns,
    scaler: Scaler,
    classifier: Box<dyn Classifier>,
}

impl ArtifactBundle {
    /// Load all three artifacts and check them against each other
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        info!("Loading model artifacts from {}", paths.dir.display());

        let columns_path = paths.columns_path();
        let columns: Vec<String> = read_json(&columns_path)?;
        let schema = ReferenceColumns::new(columns).map_err(|e| ArtifactError::Malformed {
            path: columns_path.clone(),
            reason: e.to_string(),
        })?;
        debug!("Reference schema: {} columns", schema.len());

        let scaler_path = paths.scaler_path();
        let scaler: Scaler = read_json(&scaler_path)?;
        scaler.validate().map_err(|e| ArtifactError::Malformed {
            path: scaler_path.clone(),
            reason: e.to_string(),
        })?;

        let classifier = load_classifier(&paths.model_path(), schema.len())?;

        let bundle = Self::from_parts(schema, scaler, classifier)?;
        info!(
            "Artifacts ready: {} columns, scaler over {:?}, {} classifier",
            bundle.schema.len(),
            bundle.scaler.feature_names(),
            bundle.classifier.name()
        );
        Ok(bundle)
    }

    /// Assemble a bundle from in-memory artifacts, applying the load-time checks
    pub fn from_parts(
        schema: ReferenceColumns,
        scaler: Scaler,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        check_scaler_columns(&schema, &scaler)
            .map_err(|e| ArtifactError::Inconsistent(e.to_string()))?;

        if let Some(dim) = classifier.input_dim() {
            if dim != schema.len() {
                return Err(ArtifactError::Inconsistent(format!(
                    "classifier expects {} inputs but reference schema has {} columns",
                    dim,
                    schema.len()
                )));
            }
        }

        if let Some(names) = classifier.feature_names() {
            if names.len() != schema.len() {
                return Err(ArtifactError::Inconsistent(format!(
                    "classifier names {} features but reference schema has {} columns",
                    names.len(),
                    schema.len()
                )));
            }
            if let Some(i) = names
                .iter()
                .zip(schema.columns())
                .position(|(model, reference)| model != reference)
            {
                return Err(ArtifactError::Inconsistent(format!(
                    "column {} is '{}' in the classifier but '{}' in the reference schema",
                    i,
                    names[i],
                    schema.columns()[i]
                )));
            }
        }

        Ok(Self {
            schema,
            scaler,
            classifier,
        })
    }

    /// Reference column list
    pub fn schema(&self) -> &ReferenceColumns {
        &self.schema
    }

    /// Fitted scaler
    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Trained classifier
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("columns", &self.schema.len())
            .field("scaled_features", &self.scaler.feature_names())
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }
    std::fs::read(path).map_err(|source| ArtifactError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = read_bytes(path)?;
    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn load_classifier(path: &Path, input_dim: usize) -> Result<Box<dyn Classifier>, ArtifactError> {
    let malformed = |e: InferenceError| ArtifactError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("onnx") => {
            if !path.exists() {
                return Err(ArtifactError::Missing {
                    path: path.to_path_buf(),
                });
            }
            let model = OnnxClassifier::load(path, input_dim).map_err(malformed)?;
            Ok(Box::new(model))
        }
        Some("json") => {
            let bytes = read_bytes(path)?;
            let json = String::from_utf8(bytes).map_err(|e| ArtifactError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let model = LogisticClassifier::from_json(&json).map_err(malformed)?;
            Ok(Box::new(model))
        }
        other => Err(ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason: format!("unsupported model format {:?}; expected .onnx or .json", other),
        }),
    }
}
