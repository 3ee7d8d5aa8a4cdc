//! Shared fixtures for unit tests

use crate::record::{NumericInput, RawCustomerRecord};
use crate::scaler::Scaler;
use crate::schema::ReferenceColumns;

const COLUMNS_JSON: &str = include_str!("../../../model_artifacts/training_columns.json");
const SCALER_JSON: &str = include_str!("../../../model_artifacts/scaler.json");

pub fn reference_schema() -> ReferenceColumns {
    let columns: Vec<String> = serde_json::from_str(COLUMNS_JSON).unwrap();
    ReferenceColumns::new(columns).unwrap()
}

pub fn sample_scaler() -> Scaler {
    serde_json::from_str(SCALER_JSON).unwrap()
}

pub fn sample_record() -> RawCustomerRecord {
    RawCustomerRecord {
        gender: "Male".to_string(),
        senior_citizen: 0,
        partner: "No".to_string(),
        dependents: "No".to_string(),
        tenure: 12,
        phone_service: "Yes".to_string(),
        multiple_lines: "No".to_string(),
        internet_service: "DSL".to_string(),
        online_security: "No".to_string(),
        online_backup: "No".to_string(),
        device_protection: "No".to_string(),
        tech_support: "No".to_string(),
        streaming_tv: "No".to_string(),
        streaming_movies: "No".to_string(),
        contract: "Month-to-month".to_string(),
        paperless_billing: "Yes".to_string(),
        payment_method: "Electronic check".to_string(),
        monthly_charges: 70.0,
        total_charges: NumericInput::Number(700.0),
    }
}
