//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands persist analytics results; queries only read and compute.

pub mod handlers;

pub use handlers::{
    AnalyzeEvaluatorBiasHandler, AnalyzeEvaluatorBiasQuery, CalculateReliabilityCommand,
    CalculateReliabilityHandler, CalculateReliabilityResult, GenerateAdverseImpactReportCommand,
    GenerateAdverseImpactReportHandler, GenerateAdverseImpactReportResult,
    GetAnalyticsSummaryHandler, GetAnalyticsSummaryQuery, GetReliabilityHistoryHandler,
    GetReliabilityHistoryQuery,
};
