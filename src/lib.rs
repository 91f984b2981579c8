//! Hiring Analytics - Inter-rater reliability and bias analytics
//!
//! Computes how consistently evaluators score candidates (ICC), which
//! evaluators score systematically high or low, and whether demographic
//! groups pass at disproportionate rates (four-fifths rule).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
