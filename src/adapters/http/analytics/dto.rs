//! Request and response DTOs for analytics endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::analytics::{
    AnalyticsSummary, BiasReport, EvaluatorBiasResult, IccResult, ReliabilityScope,
    ReliabilityScore,
};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of POST /api/analytics/reliability.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateReliabilityRequest {
    pub assessment_id: Option<String>,
    pub evaluator_id: Option<String>,
}

/// Query parameters for GET /api/analytics/reliability/history.
#[derive(Debug, Deserialize)]
pub struct ReliabilityHistoryParams {
    pub limit: Option<usize>,
}

/// Query parameters for GET /api/analytics/evaluator-bias.
#[derive(Debug, Deserialize)]
pub struct EvaluatorBiasParams {
    pub assessment_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// A stored reliability score as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityScoreView {
    pub id: String,
    pub assessment_id: Option<String>,
    pub scope: String,
    pub evaluator_id: Option<String>,
    pub icc: f64,
    pub interpretation: String,
    pub mean_score: f64,
    pub std_dev: f64,
    pub sample_size: usize,
    pub calculated_at: String,
}

impl From<&ReliabilityScore> for ReliabilityScoreView {
    fn from(score: &ReliabilityScore) -> Self {
        let (scope, evaluator_id) = match &score.scope {
            ReliabilityScope::Organization => ("organization", None),
            ReliabilityScope::Evaluator(id) => ("evaluator", Some(id.to_string())),
        };
        Self {
            id: score.id.to_string(),
            assessment_id: score.assessment_id.map(|id| id.to_string()),
            scope: scope.to_string(),
            evaluator_id,
            icc: score.icc,
            interpretation: score.interpretation.as_str().to_string(),
            mean_score: score.mean_score,
            std_dev: score.std_dev,
            sample_size: score.sample_size,
            calculated_at: score.calculated_at.to_string(),
        }
    }
}

/// Response of POST /api/analytics/reliability.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReliabilityResponse {
    Calculated {
        score: ReliabilityScoreView,
        result: IccResult,
    },
    InsufficientData {
        sample_size: usize,
        message: String,
    },
}

/// Response of POST /api/analytics/adverse-impact.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdverseImpactResponse {
    Generated { report: BiasReport },
    InsufficientData { message: String },
}

/// Response of GET /api/analytics/summary.
#[derive(Debug, Serialize)]
pub struct AnalyticsSummaryResponse {
    pub organization_id: String,
    pub total_evaluations: u64,
    pub latest_reliability: Option<ReliabilityScoreView>,
    pub reliability_history: Vec<ReliabilityScoreView>,
    pub evaluator_bias: Vec<EvaluatorBiasResult>,
    pub lenient_evaluators: usize,
    pub strict_evaluators: usize,
    pub flagged_evaluators: usize,
    pub latest_adverse_impact: Option<BiasReport>,
    pub generated_at: String,
}

impl From<AnalyticsSummary> for AnalyticsSummaryResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        let flagged_evaluators = summary.flagged_evaluators();
        Self {
            organization_id: summary.organization_id.to_string(),
            total_evaluations: summary.total_evaluations,
            latest_reliability: summary.latest_reliability.as_ref().map(ReliabilityScoreView::from),
            reliability_history: summary
                .reliability_history
                .iter()
                .map(ReliabilityScoreView::from)
                .collect(),
            evaluator_bias: summary.evaluator_bias,
            lenient_evaluators: summary.lenient_evaluators,
            strict_evaluators: summary.strict_evaluators,
            flagged_evaluators,
            latest_adverse_impact: summary.latest_adverse_impact,
            generated_at: summary.generated_at.to_string(),
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self {
            code: "INSUFFICIENT_DATA".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::Distribution;
    use crate::domain::foundation::{EvaluatorId, OrganizationId, Timestamp};

    fn score(scope: ReliabilityScope) -> ReliabilityScore {
        let icc = IccResult {
            icc: 0.91,
            mean_square_between: 3.0,
            mean_square_within: 0.1,
            num_subjects: 4,
            num_raters: 3,
            grand_mean: 3.5,
            average_raters_per_subject: 2.5,
        };
        let dist = Distribution::of(vec![3.0, 4.0]).unwrap();
        ReliabilityScore::from_calculation(
            OrganizationId::new(),
            None,
            scope,
            &icc,
            &dist,
            Timestamp::now(),
        )
    }

    #[test]
    fn organization_scope_view_has_no_evaluator() {
        let view = ReliabilityScoreView::from(&score(ReliabilityScope::Organization));
        assert_eq!(view.scope, "organization");
        assert!(view.evaluator_id.is_none());
        assert_eq!(view.interpretation, "excellent");
    }

    #[test]
    fn evaluator_scope_view_carries_evaluator_id() {
        let view = ReliabilityScoreView::from(&score(ReliabilityScope::Evaluator(
            EvaluatorId::new("e-42").unwrap(),
        )));
        assert_eq!(view.scope, "evaluator");
        assert_eq!(view.evaluator_id.as_deref(), Some("e-42"));
    }

    #[test]
    fn insufficient_data_response_is_tagged() {
        let response = ReliabilityResponse::InsufficientData {
            sample_size: 4,
            message: "not enough overlap".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "insufficient_data");
        assert_eq!(json["sample_size"], 4);
    }
}
