//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx/PostgreSQL persistence
//! - `memory` - In-memory store for tests and local runs
//! - `http` - Axum REST endpoints

pub mod http;
pub mod memory;
pub mod postgres;

pub use http::{api_router, AnalyticsAppState};
pub use memory::{InMemoryAnalyticsStore, StoredEvaluation};
pub use postgres::{
    PostgresBiasReportRepository, PostgresEvaluationReader, PostgresReliabilityScoreRepository,
};
