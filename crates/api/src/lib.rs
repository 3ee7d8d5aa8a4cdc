//! Churn Prediction API Server
//!
//! HTTP surface for the churn inference service.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod service;
pub mod validation;

use artifact_store::ArtifactBundle;
use crate::config::{AppConfig, LoggingConfig, RateLimitSettings};
use crate::service::ChurnService;

/// Application state shared across handlers; read-only after startup
pub struct AppState {
    /// Inference service
    pub service: ChurnService,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle when the exporter is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(artifacts: Arc<ArtifactBundle>) -> Self {
        Self {
            service: ChurnService::new(artifacts),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, limits: &RateLimitSettings) -> Router {
    let mut predict = Router::new().route("/predict", post(routes::predictions::predict_churn));

    if limits.enabled {
        match rate_limit::create_governor_config(limits) {
            Some(config) => {
                info!(
                    "Rate limiting /predict: burst {}, one request per {}s",
                    limits.burst_size, limits.per_second
                );
                predict = predict.layer(GovernorLayer { config });
            }
            None => tracing::warn!("Invalid rate limit settings; rate limiting disabled"),
        }
    }

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .merge(predict)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level = Level::from_str(&config.level)
        .with_context(|| format!("invalid log level '{}'", config.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.format == "json" {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.context("failed to set tracing subscriber")
}

/// Load artifacts and serve until the process is stopped
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let artifacts = ArtifactBundle::load(&config.artifacts)
        .context("could not load a required model artifact")?;

    let mut state = AppState::new(Arc::new(artifacts));
    if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        state = state.with_metrics(handle);
    }

    let app = create_router(Arc::new(state), &config.rate_limit);

    let addr = config.server.bind_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
