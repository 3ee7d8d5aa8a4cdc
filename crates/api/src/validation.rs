//! Request Validation
//!
//! Range checks applied to a decoded record before it reaches the feature
//! builder. Type and presence checks are done by the JSON extractor.

use feature_engine::{coerce_or_default, RawCustomerRecord};
use thiserror::Error;

/// Errors during record validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value is not a finite number
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// Validator for inbound customer records
#[derive(Debug, Clone, Default)]
pub struct RecordValidator;

impl RecordValidator {
    /// Validate a single value against a range
    fn validate_range(
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Check the numeric fields of a record
    pub fn validate(&self, record: &RawCustomerRecord) -> Result<(), ValidationError> {
        Self::validate_range("SeniorCitizen", record.senior_citizen as f64, (0.0, 1.0))?;
        Self::validate_range("tenure", record.tenure as f64, (0.0, f64::MAX))?;
        Self::validate_range("MonthlyCharges", record.monthly_charges, (0.0, f64::MAX))?;
        // Blank or non-numeric totals coerce to 0 and pass
        let total_charges = coerce_or_default(&record.total_charges, 0.0);
        Self::validate_range("TotalCharges", total_charges, (0.0, f64::MAX))?;
        Ok(())
    }
}
