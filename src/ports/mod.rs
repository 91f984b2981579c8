//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input Ports
//!
//! - `EvaluationReader` - Recorded evaluation scores and demographic counts
//!
//! ## Output Ports
//!
//! - `ReliabilityScoreRepository` - Computed ICC scores, upserted per scope
//! - `BiasReportRepository` - Adverse-impact report snapshots

mod analytics_error;
mod bias_report_repository;
mod evaluation_reader;
mod reliability_repository;

pub use analytics_error::AnalyticsError;
pub use bias_report_repository::BiasReportRepository;
pub use evaluation_reader::EvaluationReader;
pub use reliability_repository::ReliabilityScoreRepository;
