use async_trait::async_trait;

use super::AnalyticsError;
use crate::domain::analytics::{DemographicGroup, EvaluationRecord, EvaluatorScore};
use crate::domain::foundation::{AssessmentId, OrganizationId};

/// Read-only port supplying analytics input from recorded evaluations.
///
/// Implementations return validated, typed rows; the analytics core does not
/// re-check them.
#[async_trait]
pub trait EvaluationReader: Send + Sync {
    /// Gets (subject, rater, score) records for an organization,
    /// optionally limited to one assessment.
    async fn fetch_evaluation_records(
        &self,
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
    ) -> Result<Vec<EvaluationRecord>, AnalyticsError>;

    /// Gets scores with evaluator names for leniency analysis.
    async fn fetch_evaluator_scores(
        &self,
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
    ) -> Result<Vec<EvaluatorScore>, AnalyticsError>;

    /// Gets pass/fail counts aggregated per (category, group).
    async fn fetch_demographic_groups(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DemographicGroup>, AnalyticsError>;

    /// Counts all evaluations recorded for an organization.
    async fn count_evaluations(&self, organization_id: OrganizationId)
        -> Result<u64, AnalyticsError>;
}
