//! Feature Row Assembly
//!
//! Raw record -> derived features -> one-hot encoding -> schema projection -> scaling.

use crate::encoding::{
    DerivedFeatureRow, EncodedFeatureRow, RecordEncoding, ScaledFeatureRow, MONTH_TO_TOTAL_RATIO,
    TENURE_IN_YEARS,
};
use crate::record::{coerce_or_default, RawCustomerRecord, SUBSCRIBED};
use crate::scaler::Scaler;
use crate::schema::ReferenceColumns;
use crate::FeatureError;
use tracing::trace;

/// Stateless builder for model input rows
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Compute derived features and drop tenure and charge fields
    pub fn derive(raw: &RawCustomerRecord) -> DerivedFeatureRow {
        let total_charges = coerce_or_default(&raw.total_charges, 0.0);

        let services_used = raw
            .service_fields()
            .iter()
            .filter(|(_, value)| *value == SUBSCRIBED)
            .count() as u32;

        DerivedFeatureRow {
            categorical: DerivedFeatureRow::categorical_from(raw),
            senior_citizen: raw.senior_citizen as f64,
            services_used,
            tenure_in_years: raw.tenure as f64 / 12.0,
            month_to_total_ratio: raw.monthly_charges / (total_charges + 1.0),
        }
    }

    /// Derive, one-hot encode and align a record to the reference schema
    pub fn encode(raw: &RawCustomerRecord, schema: &ReferenceColumns) -> EncodedFeatureRow {
        let derived = Self::derive(raw);
        let encoding = RecordEncoding::from_derived(&derived);
        let row = encoding.project(schema);

        trace!(
            "Encoded {} columns onto {} reference columns",
            encoding.len(),
            row.len()
        );
        row
    }

    /// Full transformation to a scaled, schema-aligned row
    pub fn build(
        raw: &RawCustomerRecord,
        schema: &ReferenceColumns,
        scaler: &Scaler,
    ) -> Result<ScaledFeatureRow, FeatureError> {
        let derived = Self::derive(raw);
        for (column, value) in [
            (TENURE_IN_YEARS, derived.tenure_in_years),
            (MONTH_TO_TOTAL_RATIO, derived.month_to_total_ratio),
        ] {
            if !value.is_finite() {
                return Err(FeatureError::NonFiniteFeature(column));
            }
        }

        let mut row = RecordEncoding::from_derived(&derived).project(schema);
        Self::scale(&mut row, schema, scaler)?;
        Ok(ScaledFeatureRow(row))
    }

    /// Apply the scaler to its columns in place
    fn scale(
        row: &mut EncodedFeatureRow,
        schema: &ReferenceColumns,
        scaler: &Scaler,
    ) -> Result<(), FeatureError> {
        scaler.validate()?;
        for (i, name) in scaler.feature_names().iter().enumerate() {
            let pos = schema
                .position(name)
                .ok_or_else(|| FeatureError::MissingScaledColumn(name.clone()))?;
            row.values[pos] = scaler.transform_one(i, row.values[pos]);
        }
        Ok(())
    }
}

/// Check that every column the scaler transforms exists in the schema
pub fn check_scaler_columns(schema: &ReferenceColumns, scaler: &Scaler) -> Result<(), FeatureError> {
    scaler.validate()?;
    match scaler.feature_names().iter().find(|name| !schema.contains(name)) {
        Some(name) => Err(FeatureError::MissingScaledColumn(name.clone())),
        None => Ok(()),
    }
}
