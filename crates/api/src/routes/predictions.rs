//! Prediction Routes

use axum::{extract::State, Json};
use feature_engine::RawCustomerRecord;
use inference_engine::PredictionResult;
use std::sync::Arc;

use crate::error::ApiError;
use crate::validation::RecordValidator;
use crate::AppState;

/// Score one customer record
pub async fn predict_churn(
    State(state): State<Arc<AppState>>,
    Json(record): Json<RawCustomerRecord>,
) -> Result<Json<PredictionResult>, ApiError> {
    RecordValidator.validate(&record)?;
    let result = state.service.predict_churn(&record)?;
    Ok(Json(result))
}
