//! Numeric Feature Scaling
//!
//! Mirrors the fitted sklearn scalers used at training time. Only the
//! columns named in `feature_names` are transformed.

use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Derived numeric columns that are scaled before scoring
pub const SCALED_FEATURES: [&str; 2] = ["TenureInYears", "MonthToTotalRatio"];

fn default_feature_names() -> Vec<String> {
    SCALED_FEATURES.iter().map(|s| s.to_string()).collect()
}

/// Fitted scaling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// Z-score: `(x - mean) / scale`
    Standard {
        #[serde(default = "default_feature_names")]
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    /// Min-max: `x * scale + min`
    MinMax {
        #[serde(default = "default_feature_names")]
        feature_names: Vec<String>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl Scaler {
    /// Standard scaler over the default derived features
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, FeatureError> {
        let scaler = Scaler::Standard {
            feature_names: default_feature_names(),
            mean,
            scale,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Columns this scaler transforms, in parameter order
    pub fn feature_names(&self) -> &[String] {
        match self {
            Scaler::Standard { feature_names, .. } | Scaler::MinMax { feature_names, .. } => {
                feature_names
            }
        }
    }

    /// Check parameter lengths and values
    pub fn validate(&self) -> Result<(), FeatureError> {
        let (names, offsets, scales) = match self {
            Scaler::Standard { feature_names, mean, scale } => (feature_names, mean, scale),
            Scaler::MinMax { feature_names, min, scale } => (feature_names, min, scale),
        };

        if names.is_empty() {
            return Err(FeatureError::InvalidScaler("no features to scale".to_string()));
        }
        if offsets.len() != names.len() || scales.len() != names.len() {
            return Err(FeatureError::InvalidScaler(format!(
                "{} feature names but {} offsets and {} scales",
                names.len(),
                offsets.len(),
                scales.len()
            )));
        }
        if offsets.iter().chain(scales.iter()).any(|v| !v.is_finite()) {
            return Err(FeatureError::InvalidScaler("non-finite parameter".to_string()));
        }
        Ok(())
    }

    /// Transform the value at parameter position `i`
    pub fn transform_one(&self, i: usize, value: f64) -> f64 {
        match self {
            Scaler::Standard { mean, scale, .. } => {
                // sklearn replaces a zero scale with 1
                let s = if scale[i] == 0.0 { 1.0 } else { scale[i] };
                (value - mean[i]) / s
            }
            Scaler::MinMax { min, scale, .. } => value * scale[i] + min[i],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_transform() {
        let scaler = Scaler::standard(vec![2.0, 0.5], vec![2.0, 0.25]).unwrap();
        assert_eq!(scaler.transform_one(0, 4.0), 1.0);
        assert_eq!(scaler.transform_one(1, 0.0), -2.0);
    }

    #[test]
    fn test_zero_scale_is_identity_shift() {
        let scaler = Scaler::standard(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(scaler.transform_one(0, 3.0), 2.0);
    }

    #[test]
    fn test_min_max_from_json() {
        let json = r#"{"kind": "min_max", "min": [0.0, -0.1], "scale": [0.5, 2.0]}"#;
        let scaler: Scaler = serde_json::from_str(json).unwrap();
        scaler.validate().unwrap();
        assert_eq!(scaler.feature_names(), &["TenureInYears", "MonthToTotalRatio"]);
        assert_eq!(scaler.transform_one(0, 4.0), 2.0);
        assert!((scaler.transform_one(1, 0.5) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(matches!(
            Scaler::standard(vec![1.0], vec![1.0, 2.0]),
            Err(FeatureError::InvalidScaler(_))
        ));
    }
}
