//! AnalyzeEvaluatorBiasHandler - Query handler for evaluator leniency/strictness.

use std::sync::Arc;

use tracing::debug;

use crate::domain::analytics::{EvaluatorBiasAnalyzer, EvaluatorBiasResult};
use crate::domain::foundation::{AssessmentId, OrganizationId};
use crate::ports::{AnalyticsError, EvaluationReader};

/// Query to analyze evaluator bias within an organization.
#[derive(Debug, Clone)]
pub struct AnalyzeEvaluatorBiasQuery {
    pub organization_id: OrganizationId,
    pub assessment_id: Option<AssessmentId>,
}

pub type AnalyzeEvaluatorBiasResult = Vec<EvaluatorBiasResult>;

pub struct AnalyzeEvaluatorBiasHandler {
    reader: Arc<dyn EvaluationReader>,
}

impl AnalyzeEvaluatorBiasHandler {
    pub fn new(reader: Arc<dyn EvaluationReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: AnalyzeEvaluatorBiasQuery,
    ) -> Result<AnalyzeEvaluatorBiasResult, AnalyticsError> {
        let scores = self
            .reader
            .fetch_evaluator_scores(query.organization_id, query.assessment_id)
            .await?;

        let results = EvaluatorBiasAnalyzer::analyze(&scores);

        debug!(
            organization_id = %query.organization_id,
            evaluators = results.len(),
            flagged = results.iter().filter(|r| r.bias_direction.is_biased()).count(),
            "Evaluator bias analyzed"
        );

        Ok(results)
    }
}
