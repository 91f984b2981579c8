//! CalculateReliabilityHandler - Command handler for computing and storing ICC.
//!
//! Fetches evaluation records, builds the rating matrix, runs the ICC
//! calculation and upserts the resulting score for its scope.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::analytics::{
    Distribution, EvaluationRecord, IccCalculator, IccResult, RatingMatrix, ReliabilityScope,
    ReliabilityScore,
};
use crate::domain::foundation::{AssessmentId, EvaluatorId, OrganizationId, Timestamp};
use crate::ports::{AnalyticsError, EvaluationReader, ReliabilityScoreRepository};

/// Fewest evaluation records accepted before the ICC calculation is attempted.
pub const MIN_EVALUATIONS_FOR_RELIABILITY: usize = 4;

/// Command to calculate inter-rater reliability.
#[derive(Debug, Clone)]
pub struct CalculateReliabilityCommand {
    pub organization_id: OrganizationId,
    /// Restrict to one assessment; all assessments when None.
    pub assessment_id: Option<AssessmentId>,
    /// Restrict to subjects this evaluator rated; organization-wide when None.
    pub evaluator_id: Option<EvaluatorId>,
}

/// Outcome of a reliability calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculateReliabilityResult {
    /// ICC computed and persisted.
    Calculated {
        score: ReliabilityScore,
        icc: IccResult,
    },
    /// Enough records, but no subject pairing usable for ICC. Nothing stored.
    InsufficientData { sample_size: usize },
}

/// Handler for calculating inter-rater reliability.
pub struct CalculateReliabilityHandler {
    reader: Arc<dyn EvaluationReader>,
    repository: Arc<dyn ReliabilityScoreRepository>,
}

impl CalculateReliabilityHandler {
    pub fn new(
        reader: Arc<dyn EvaluationReader>,
        repository: Arc<dyn ReliabilityScoreRepository>,
    ) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(
        &self,
        cmd: CalculateReliabilityCommand,
    ) -> Result<CalculateReliabilityResult, AnalyticsError> {
        let records = self
            .reader
            .fetch_evaluation_records(cmd.organization_id, cmd.assessment_id)
            .await?;

        let scope = ReliabilityScope::from_evaluator(cmd.evaluator_id);
        let records = restrict_to_scope(records, &scope);

        if records.len() < MIN_EVALUATIONS_FOR_RELIABILITY {
            return Err(AnalyticsError::InsufficientData {
                found: records.len(),
                required: MIN_EVALUATIONS_FOR_RELIABILITY,
            });
        }

        let matrix = RatingMatrix::from_records(&records);
        let Some(icc) = IccCalculator::calculate(&matrix) else {
            debug!(
                organization_id = %cmd.organization_id,
                scope = %scope,
                records = records.len(),
                "ICC undefined for rating matrix"
            );
            return Ok(CalculateReliabilityResult::InsufficientData {
                sample_size: matrix.rating_count(),
            });
        };

        let values: Vec<f64> = matrix
            .rows()
            .flat_map(|(_, ratings)| ratings.values().map(|score| score.as_f64()))
            .collect();
        let distribution =
            Distribution::of(values).ok_or(AnalyticsError::InsufficientData {
                found: 0,
                required: MIN_EVALUATIONS_FOR_RELIABILITY,
            })?;

        let score = ReliabilityScore::from_calculation(
            cmd.organization_id,
            cmd.assessment_id,
            scope,
            &icc,
            &distribution,
            Timestamp::now(),
        );
        let stored = self.repository.upsert(&score).await?;

        info!(
            organization_id = %stored.organization_id,
            scope = %stored.scope,
            icc = stored.icc,
            interpretation = %stored.interpretation,
            "Reliability score stored"
        );

        Ok(CalculateReliabilityResult::Calculated { score: stored, icc })
    }
}

/// Keeps every rating of the subjects the scoped evaluator rated, so the ICC
/// still compares that evaluator against the other raters of the same subjects.
fn restrict_to_scope(
    records: Vec<EvaluationRecord>,
    scope: &ReliabilityScope,
) -> Vec<EvaluationRecord> {
    match scope {
        ReliabilityScope::Organization => records,
        ReliabilityScope::Evaluator(evaluator_id) => {
            let rated: BTreeSet<_> = records
                .iter()
                .filter(|r| &r.rater_id == evaluator_id)
                .map(|r| r.subject_id.clone())
                .collect();
            records
                .into_iter()
                .filter(|r| rated.contains(&r.subject_id))
                .collect()
        }
    }
}
