//! Churn Feature Engine
//!
//! Turns a raw customer record into the scaled, schema-aligned row the
//! churn classifier was trained on.

mod builder;
mod encoding;
mod record;
mod scaler;
mod schema;

#[cfg(test)]
mod test_support;

pub use builder::{check_scaler_columns, FeatureBuilder};
pub use encoding::{
    DerivedFeatureRow, EncodedFeatureRow, RecordEncoding, ScaledFeatureRow, MONTH_TO_TOTAL_RATIO,
    SENIOR_CITIZEN, SERVICES_USED, TENURE_IN_YEARS,
};
pub use record::{coerce_or_default, NumericInput, RawCustomerRecord, SUBSCRIBED};
pub use scaler::{Scaler, SCALED_FEATURES};
pub use schema::ReferenceColumns;

use thiserror::Error;

/// Errors while building a feature row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Reference schema has no column '{0}' required by the scaler")]
    MissingScaledColumn(String),
    #[error("Invalid reference schema: {0}")]
    InvalidSchema(String),
    #[error("Invalid scaler: {0}")]
    InvalidScaler(String),
    #[error("Derived feature '{0}' is not a finite number")]
    NonFiniteFeature(&'static str),
}
