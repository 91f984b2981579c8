//! Aggregated analytics view for an organization.

use serde::{Deserialize, Serialize};

use super::{BiasDirection, BiasReport, EvaluatorBiasResult, ReliabilityScore};
use crate::domain::foundation::{OrganizationId, Timestamp};

/// Everything the analytics summary page shows, gathered in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub organization_id: OrganizationId,
    pub total_evaluations: u64,
    /// Most recent entry of `reliability_history`.
    pub latest_reliability: Option<ReliabilityScore>,
    /// Newest first.
    pub reliability_history: Vec<ReliabilityScore>,
    pub evaluator_bias: Vec<EvaluatorBiasResult>,
    pub lenient_evaluators: usize,
    pub strict_evaluators: usize,
    /// `None` when no report exists or it could not be loaded.
    pub latest_adverse_impact: Option<BiasReport>,
    pub generated_at: Timestamp,
}

impl AnalyticsSummary {
    /// Assembles the summary and derives its counters.
    pub fn assemble(
        organization_id: OrganizationId,
        total_evaluations: u64,
        reliability_history: Vec<ReliabilityScore>,
        evaluator_bias: Vec<EvaluatorBiasResult>,
        latest_adverse_impact: Option<BiasReport>,
        generated_at: Timestamp,
    ) -> Self {
        let count = |direction: BiasDirection| {
            evaluator_bias
                .iter()
                .filter(|r| r.bias_direction == direction)
                .count()
        };
        let lenient_evaluators = count(BiasDirection::Lenient);
        let strict_evaluators = count(BiasDirection::Strict);

        let latest_reliability = reliability_history
            .iter()
            .max_by_key(|s| s.calculated_at)
            .cloned();

        Self {
            organization_id,
            total_evaluations,
            latest_reliability,
            reliability_history,
            evaluator_bias,
            lenient_evaluators,
            strict_evaluators,
            latest_adverse_impact,
            generated_at,
        }
    }

    /// Evaluators flagged as lenient or strict.
    pub fn flagged_evaluators(&self) -> usize {
        self.lenient_evaluators + self.strict_evaluators
    }
}
