//! PostgreSQL adapters - Database implementations for analytics ports.
//!
//! - `PostgresEvaluationReader` - Evaluation scores and demographic pass counts
//! - `PostgresReliabilityScoreRepository` - Upserted ICC scores
//! - `PostgresBiasReportRepository` - JSONB adverse-impact reports

mod bias_report_repository;
mod evaluation_reader;
mod reliability_score_repository;

pub use bias_report_repository::PostgresBiasReportRepository;
pub use evaluation_reader::PostgresEvaluationReader;
pub use reliability_score_repository::PostgresReliabilityScoreRepository;
