//! One-Hot Encoding and Schema Projection

use crate::record::RawCustomerRecord;
use crate::schema::ReferenceColumns;
use std::collections::HashMap;
use std::sync::Arc;

/// Column names of the derived numeric features
pub const SERVICES_USED: &str = "ServicesUsed";
pub const TENURE_IN_YEARS: &str = "TenureInYears";
pub const MONTH_TO_TOTAL_RATIO: &str = "MonthToTotalRatio";
pub const SENIOR_CITIZEN: &str = "SeniorCitizen";

/// Raw record with derived features; tenure and charges are no longer present
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatureRow {
    /// `(field, value)` for every categorical field
    pub categorical: Vec<(&'static str, String)>,
    pub senior_citizen: f64,
    pub services_used: u32,
    pub tenure_in_years: f64,
    pub month_to_total_ratio: f64,
}

impl DerivedFeatureRow {
    /// Collect the categorical fields of a raw record
    pub(crate) fn categorical_from(raw: &RawCustomerRecord) -> Vec<(&'static str, String)> {
        raw.categorical_fields()
            .iter()
            .map(|(field, value)| (*field, value.to_string()))
            .collect()
    }
}

/// Sparse encoding of one record: column name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordEncoding {
    values: HashMap<String, f64>,
}

impl RecordEncoding {
    /// Expand categoricals into `{field}_{value}` indicators alongside the numeric columns.
    ///
    /// The indicator for the level dropped at training time is still emitted
    /// here; it has no reference column, so projection discards it and the
    /// field falls back to its all-zero baseline.
    pub fn from_derived(row: &DerivedFeatureRow) -> Self {
        let mut values = HashMap::with_capacity(row.categorical.len() + 4);
        values.insert(SENIOR_CITIZEN.to_string(), row.senior_citizen);
        values.insert(SERVICES_USED.to_string(), f64::from(row.services_used));
        values.insert(TENURE_IN_YEARS.to_string(), row.tenure_in_years);
        values.insert(MONTH_TO_TOTAL_RATIO.to_string(), row.month_to_total_ratio);

        for (field, value) in &row.categorical {
            values.insert(format!("{}_{}", field, value), 1.0);
        }

        Self { values }
    }

    /// Value for a column, if this record produced it
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Number of columns produced
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reindex onto the reference schema, filling absent columns with 0
    pub fn project(&self, schema: &ReferenceColumns) -> EncodedFeatureRow {
        let values = schema
            .columns()
            .iter()
            .map(|column| self.get(column).unwrap_or(0.0))
            .collect();

        EncodedFeatureRow {
            columns: schema.shared_columns(),
            values,
        }
    }
}

/// Dense row with exactly the reference schema's columns, in order
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureRow {
    pub(crate) columns: Arc<[String]>,
    pub(crate) values: Vec<f64>,
}

impl EncodedFeatureRow {
    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encoded row after the scaler has been applied to the derived numerics
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFeatureRow(pub(crate) EncodedFeatureRow);

impl ScaledFeatureRow {
    pub fn columns(&self) -> &[String] {
        self.0.columns()
    }

    pub fn values(&self) -> &[f64] {
        self.0.values()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
