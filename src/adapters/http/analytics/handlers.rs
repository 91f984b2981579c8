//! HTTP handlers for analytics endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Json, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::application::handlers::{
    AnalyzeEvaluatorBiasHandler, AnalyzeEvaluatorBiasQuery, CalculateReliabilityCommand,
    CalculateReliabilityHandler, CalculateReliabilityResult, GenerateAdverseImpactReportCommand,
    GenerateAdverseImpactReportHandler, GenerateAdverseImpactReportResult,
    GetAnalyticsSummaryHandler, GetAnalyticsSummaryQuery, GetReliabilityHistoryHandler,
    GetReliabilityHistoryQuery,
};
use crate::domain::analytics::EvaluatorBiasResult;
use crate::domain::foundation::{
    AssessmentId, DomainError, ErrorCode, EvaluatorId, OrganizationId, ValidationError,
};
use crate::ports::{
    AnalyticsError, BiasReportRepository, EvaluationReader, ReliabilityScoreRepository,
};

use super::dto::{
    AdverseImpactResponse, AnalyticsSummaryResponse, CalculateReliabilityRequest, ErrorResponse,
    EvaluatorBiasParams, ReliabilityHistoryParams, ReliabilityResponse, ReliabilityScoreView,
};

/// Header carrying the caller's organization.
pub const ORGANIZATION_HEADER: &str = "x-organization-id";

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Analytics API error that implements IntoResponse.
#[derive(Debug)]
pub enum AnalyticsApiError {
    BadRequest(String),
    Unauthorized(String),
    InsufficientData(String),
    Internal(String),
}

impl IntoResponse for AnalyticsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AnalyticsApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            AnalyticsApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::unauthorized(msg))
            }
            AnalyticsApiError::InsufficientData(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::insufficient_data(msg),
            ),
            AnalyticsApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<DomainError> for AnalyticsApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => AnalyticsApiError::BadRequest(err.message),
            ErrorCode::InsufficientData => AnalyticsApiError::InsufficientData(err.message),
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                error!(code = %err.code, error = %err.message, "Analytics request failed");
                AnalyticsApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<AnalyticsError> for AnalyticsApiError {
    fn from(err: AnalyticsError) -> Self {
        DomainError::from(err).into()
    }
}

impl From<ValidationError> for AnalyticsApiError {
    fn from(err: ValidationError) -> Self {
        DomainError::from(err).into()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing analytics dependencies.
#[derive(Clone)]
pub struct AnalyticsAppState {
    pub evaluation_reader: Arc<dyn EvaluationReader>,
    pub reliability_repository: Arc<dyn ReliabilityScoreRepository>,
    pub bias_report_repository: Arc<dyn BiasReportRepository>,
    pub history_limit: usize,
}

impl AnalyticsAppState {
    pub fn calculate_reliability_handler(&self) -> CalculateReliabilityHandler {
        CalculateReliabilityHandler::new(
            self.evaluation_reader.clone(),
            self.reliability_repository.clone(),
        )
    }

    pub fn reliability_history_handler(&self) -> GetReliabilityHistoryHandler {
        GetReliabilityHistoryHandler::new(self.reliability_repository.clone(), self.history_limit)
    }

    pub fn evaluator_bias_handler(&self) -> AnalyzeEvaluatorBiasHandler {
        AnalyzeEvaluatorBiasHandler::new(self.evaluation_reader.clone())
    }

    pub fn adverse_impact_handler(&self) -> GenerateAdverseImpactReportHandler {
        GenerateAdverseImpactReportHandler::new(
            self.evaluation_reader.clone(),
            self.bias_report_repository.clone(),
        )
    }

    pub fn summary_handler(&self) -> GetAnalyticsSummaryHandler {
        GetAnalyticsSummaryHandler::new(
            self.evaluation_reader.clone(),
            self.reliability_repository.clone(),
            self.bias_report_repository.clone(),
            self.history_limit,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Organization Context
// ════════════════════════════════════════════════════════════════════════════════

/// Organization scope extracted from the request headers.
#[derive(Debug, Clone, Copy)]
pub struct OrganizationContext {
    pub organization_id: OrganizationId,
}

#[async_trait]
impl<S> FromRequestParts<S> for OrganizationContext
where
    S: Send + Sync,
{
    type Rejection = AnalyticsApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(ORGANIZATION_HEADER).ok_or_else(|| {
            AnalyticsApiError::Unauthorized("Organization context is required".to_string())
        })?;

        let organization_id = header
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<OrganizationId>().ok())
            .ok_or_else(|| {
                AnalyticsApiError::BadRequest("Invalid organization ID format".to_string())
            })?;

        Ok(OrganizationContext { organization_id })
    }
}

fn parse_assessment_id(raw: Option<&str>) -> Result<Option<AssessmentId>, AnalyticsApiError> {
    raw.map(|s| {
        s.parse::<AssessmentId>()
            .map_err(|_| AnalyticsApiError::BadRequest("Invalid assessment ID format".to_string()))
    })
    .transpose()
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/analytics/reliability
///
/// Calculates and stores the ICC for the requested scope.
pub async fn calculate_reliability(
    State(state): State<AnalyticsAppState>,
    org: OrganizationContext,
    Json(request): Json<CalculateReliabilityRequest>,
) -> Result<Json<ReliabilityResponse>, AnalyticsApiError> {
    let assessment_id = parse_assessment_id(request.assessment_id.as_deref())?;
    let evaluator_id = request
        .evaluator_id
        .map(EvaluatorId::new)
        .transpose()
        .map_err(AnalyticsApiError::from)?;

    let cmd = CalculateReliabilityCommand {
        organization_id: org.organization_id,
        assessment_id,
        evaluator_id,
    };

    let response = match state.calculate_reliability_handler().handle(cmd).await? {
        CalculateReliabilityResult::Calculated { score, icc } => ReliabilityResponse::Calculated {
            score: ReliabilityScoreView::from(&score),
            result: icc,
        },
        CalculateReliabilityResult::InsufficientData { sample_size } => {
            ReliabilityResponse::InsufficientData {
                sample_size,
                message: "Need at least two subjects rated by two or more evaluators".to_string(),
            }
        }
    };

    Ok(Json(response))
}

/// GET /api/analytics/reliability/history
pub async fn get_reliability_history(
    State(state): State<AnalyticsAppState>,
    org: OrganizationContext,
    Query(params): Query<ReliabilityHistoryParams>,
) -> Result<Json<Vec<ReliabilityScoreView>>, AnalyticsApiError> {
    let query = GetReliabilityHistoryQuery {
        organization_id: org.organization_id,
        limit: params.limit,
    };

    let scores = state.reliability_history_handler().handle(query).await?;

    Ok(Json(scores.iter().map(ReliabilityScoreView::from).collect()))
}

/// GET /api/analytics/evaluator-bias
pub async fn get_evaluator_bias(
    State(state): State<AnalyticsAppState>,
    org: OrganizationContext,
    Query(params): Query<EvaluatorBiasParams>,
) -> Result<Json<Vec<EvaluatorBiasResult>>, AnalyticsApiError> {
    let query = AnalyzeEvaluatorBiasQuery {
        organization_id: org.organization_id,
        assessment_id: parse_assessment_id(params.assessment_id.as_deref())?,
    };

    let results = state.evaluator_bias_handler().handle(query).await?;

    Ok(Json(results))
}

/// POST /api/analytics/adverse-impact
///
/// Generates and stores a four-fifths rule report across all categories.
pub async fn generate_adverse_impact_report(
    State(state): State<AnalyticsAppState>,
    org: OrganizationContext,
) -> Result<Json<AdverseImpactResponse>, AnalyticsApiError> {
    let cmd = GenerateAdverseImpactReportCommand {
        organization_id: org.organization_id,
    };

    let response = match state.adverse_impact_handler().handle(cmd).await? {
        GenerateAdverseImpactReportResult::Generated(report) => {
            AdverseImpactResponse::Generated { report }
        }
        GenerateAdverseImpactReportResult::InsufficientData => {
            AdverseImpactResponse::InsufficientData {
                message: "Need at least two groups with five or more candidates in a category"
                    .to_string(),
            }
        }
    };

    Ok(Json(response))
}

/// GET /api/analytics/summary
pub async fn get_analytics_summary(
    State(state): State<AnalyticsAppState>,
    org: OrganizationContext,
) -> Result<Json<AnalyticsSummaryResponse>, AnalyticsApiError> {
    let query = GetAnalyticsSummaryQuery {
        organization_id: org.organization_id,
    };

    let summary = state.summary_handler().handle(query).await?;

    Ok(Json(summary.into()))
}
