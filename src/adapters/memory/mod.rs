//! In-memory adapters for tests and local development.

mod in_memory_analytics_store;

pub use in_memory_analytics_store::{InMemoryAnalyticsStore, StoredEvaluation};
