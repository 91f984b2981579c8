//! Analytics Module - Pure domain services for evaluator reliability and bias.
//!
//! This module contains stateless functions that turn recorded evaluation
//! scores into agreement and fairness statistics.
//!
//! # Components
//!
//! - `RatingMatrixBuilder` - Reshapes flat (subject, rater, score) records into a sparse matrix
//! - `IccCalculator` - One-way random-effects intraclass correlation over the matrix
//! - `EvaluatorBiasAnalyzer` - Per-evaluator leniency/strictness against the org mean
//! - `AdverseImpactAnalyzer` - 4/5ths rule across demographic groups
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. Insufficient data is an
//! expected outcome and is returned as `None`, never as an error. No numeric
//! output is ever NaN or infinite.

mod adverse_impact;
mod bias_analyzer;
mod bias_report;
mod evaluation;
mod icc_calculator;
mod rating_matrix;
mod reliability;
mod stats;
mod summary;

// Re-export all public types
pub use adverse_impact::{
    AdverseImpactAnalyzer, AdverseImpactResult, DemographicGroup, GroupImpact, Significance,
    FOUR_FIFTHS_THRESHOLD, MIN_GROUP_SAMPLE_SIZE,
};
pub use bias_analyzer::{
    BiasDirection, EvaluatorBiasAnalyzer, EvaluatorBiasResult, BIAS_FALLBACK_THRESHOLD,
    BIAS_THRESHOLD_STD_DEV_FACTOR,
};
pub use bias_report::BiasReport;
pub use evaluation::{EvaluationRecord, EvaluatorScore};
pub use icc_calculator::{
    IccCalculator, IccInterpretation, IccResult, MIN_RATERS_PER_SUBJECT, MIN_SUBJECTS,
};
pub use rating_matrix::{RatingMatrix, RatingMatrixBuilder};
pub use reliability::{assessment_key, ReliabilityScope, ReliabilityScore, ALL_ASSESSMENTS_KEY};
pub use stats::{round_to, Distribution};
pub use summary::AnalyticsSummary;
