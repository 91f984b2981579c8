//! Analytics handlers.
//!
//! Orchestrate fetch, compute and persist for each analytics use case.
//! The statistical work itself lives in `domain::analytics`.

mod analyze_evaluator_bias;
mod calculate_reliability;
mod generate_adverse_impact_report;
mod get_analytics_summary;
mod get_reliability_history;

pub use analyze_evaluator_bias::{
    AnalyzeEvaluatorBiasHandler, AnalyzeEvaluatorBiasQuery, AnalyzeEvaluatorBiasResult,
};
pub use calculate_reliability::{
    CalculateReliabilityCommand, CalculateReliabilityHandler, CalculateReliabilityResult,
    MIN_EVALUATIONS_FOR_RELIABILITY,
};
pub use generate_adverse_impact_report::{
    GenerateAdverseImpactReportCommand, GenerateAdverseImpactReportHandler,
    GenerateAdverseImpactReportResult,
};
pub use get_analytics_summary::{
    GetAnalyticsSummaryHandler, GetAnalyticsSummaryQuery, GetAnalyticsSummaryResult,
};
pub use get_reliability_history::{
    clamp_history_limit, GetReliabilityHistoryHandler, GetReliabilityHistoryQuery,
    GetReliabilityHistoryResult, MAX_HISTORY_LIMIT,
};
