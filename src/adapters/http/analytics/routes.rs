//! HTTP routes for analytics endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    calculate_reliability, generate_adverse_impact_report, get_analytics_summary,
    get_evaluator_bias, get_reliability_history, AnalyticsAppState,
};

/// Creates the analytics router with all routes.
pub fn analytics_routes(state: AnalyticsAppState) -> Router {
    Router::new()
        .route("/api/analytics/reliability", post(calculate_reliability))
        .route(
            "/api/analytics/reliability/history",
            get(get_reliability_history),
        )
        .route("/api/analytics/evaluator-bias", get(get_evaluator_bias))
        .route(
            "/api/analytics/adverse-impact",
            post(generate_adverse_impact_report),
        )
        .route("/api/analytics/summary", get(get_analytics_summary))
        .with_state(state)
}
