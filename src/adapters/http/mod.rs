//! HTTP adapters - REST API implementations.

pub mod analytics;

use axum::routing::get;
use axum::Router;

pub use analytics::{analytics_routes, AnalyticsAppState};

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Builds the full HTTP router: analytics endpoints plus the health check.
pub fn api_router(state: AnalyticsAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(analytics_routes(state))
}
