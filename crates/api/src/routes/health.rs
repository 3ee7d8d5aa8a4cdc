//! Liveness and Health Routes

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Static liveness acknowledgement
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub artifacts: ArtifactSummary,
}

/// Loaded artifact summary
#[derive(Debug, Serialize)]
pub struct ArtifactSummary {
    pub columns: usize,
    pub scaled_features: Vec<String>,
    pub classifier: String,
}

/// Liveness handler
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the Churn Prediction API",
    })
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let artifacts = state.service.artifacts();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        artifacts: ArtifactSummary {
            columns: artifacts.schema().len(),
            scaled_features: artifacts.scaler().feature_names().to_vec(),
            classifier: artifacts.classifier().name().to_string(),
        },
    })
}

/// Prometheus scrape handler
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
