//! Classifier Seam

use crate::InferenceError;

/// Raw classifier output for one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    /// Predicted class index (0 = stays, 1 = churns)
    pub class: i64,
    /// Probability mass on class 1
    pub positive_probability: f64,
}

/// A trained binary classifier, shared read-only across requests
pub trait Classifier: Send + Sync {
    /// Short identifier for logs and health output
    fn name(&self) -> &str;

    /// Number of input columns the model expects, if known
    fn input_dim(&self) -> Option<usize>;

    /// Column names the model was fitted on, if recorded
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Score one row
    fn score(&self, features: &[f64]) -> Result<ClassScores, InferenceError>;
}
