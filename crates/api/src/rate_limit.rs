//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP limits on the prediction endpoint via tower_governor.

use crate::config::RateLimitSettings;
use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP, with X-RateLimit-* headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Build a governor config from settings.
///
/// Returns `None` when the settings cannot form a quota (zero period or burst).
/// The service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` for IP extraction.
pub fn create_governor_config(settings: &RateLimitSettings) -> Option<Arc<DefaultGovernorConfig>> {
    GovernorConfigBuilder::default()
        .per_second(settings.per_second)
        .burst_size(settings.burst_size)
        .use_headers()
        .finish()
        .map(Arc::new)
}
