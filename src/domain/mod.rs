//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `analytics` - Pure domain services for reliability and bias analysis (ICC, leniency, 4/5ths rule)

pub mod analytics;
pub mod foundation;
