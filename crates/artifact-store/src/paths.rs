//! Artifact Locations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the three artifacts live on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Directory holding the artifacts
    pub dir: PathBuf,
    /// Classifier file; `.onnx` or `.json`
    pub model_file: String,
    /// Fitted scaler (JSON)
    pub scaler_file: String,
    /// Reference column list (JSON array)
    pub columns_file: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("model_artifacts"),
            model_file: "churn_model.json".to_string(),
            scaler_file: "scaler.json".to_string(),
            columns_file: "training_columns.json".to_string(),
        }
    }
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler_file)
    }

    pub fn columns_path(&self) -> PathBuf {
        self.dir.join(&self.columns_file)
    }
}
