//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analytics;

pub use analytics::{
    // Commands
    CalculateReliabilityCommand, CalculateReliabilityHandler, CalculateReliabilityResult,
    GenerateAdverseImpactReportCommand, GenerateAdverseImpactReportHandler,
    GenerateAdverseImpactReportResult,
    // Queries
    AnalyzeEvaluatorBiasHandler, AnalyzeEvaluatorBiasQuery, AnalyzeEvaluatorBiasResult,
    GetAnalyticsSummaryHandler, GetAnalyticsSummaryQuery, GetAnalyticsSummaryResult,
    GetReliabilityHistoryHandler, GetReliabilityHistoryQuery, GetReliabilityHistoryResult,
};
