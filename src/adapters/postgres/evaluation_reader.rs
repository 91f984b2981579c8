//! PostgreSQL implementation of EvaluationReader.
//!
//! Reads evaluation scores and candidate outcome counts. Rows are converted
//! into validated domain values here; malformed rows surface as errors.
//! The rated subject is the interview, so one candidate contributes a
//! separate matrix row per interview.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::analytics::{DemographicGroup, EvaluationRecord, EvaluatorScore};
use crate::domain::foundation::{AssessmentId, EvaluatorId, OrganizationId, Score, SubjectId};
use crate::ports::{AnalyticsError, EvaluationReader};

/// PostgreSQL implementation of EvaluationReader.
#[derive(Clone)]
pub struct PostgresEvaluationReader {
    pool: PgPool,
}

impl PostgresEvaluationReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    subject_id: String,
    evaluator_id: String,
    score: i32,
}

impl TryFrom<RecordRow> for EvaluationRecord {
    type Error = AnalyticsError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(EvaluationRecord::new(
            SubjectId::new(row.subject_id)?,
            EvaluatorId::new(row.evaluator_id)?,
            // Out-of-range stored scores are computed as-is.
            Score::from_raw(row.score),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EvaluatorScoreRow {
    evaluator_id: String,
    evaluator_name: String,
    score: i32,
}

impl TryFrom<EvaluatorScoreRow> for EvaluatorScore {
    type Error = AnalyticsError;

    fn try_from(row: EvaluatorScoreRow) -> Result<Self, Self::Error> {
        Ok(EvaluatorScore::new(
            EvaluatorId::new(row.evaluator_id)?,
            row.evaluator_name,
            Score::from_raw(row.score),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    category: String,
    group_name: String,
    pass_count: i64,
    total_count: i64,
}

impl TryFrom<GroupRow> for DemographicGroup {
    type Error = AnalyticsError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        let count = |field: &str, value: i64| {
            u32::try_from(value).map_err(|_| {
                AnalyticsError::Database(format!("{} out of range: {}", field, value))
            })
        };
        Ok(DemographicGroup::new(
            row.group_name,
            row.category,
            count("pass_count", row.pass_count)?,
            count("total_count", row.total_count)?,
        ))
    }
}

#[async_trait]
impl EvaluationReader for PostgresEvaluationReader {
    async fn fetch_evaluation_records(
        &self,
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
    ) -> Result<Vec<EvaluationRecord>, AnalyticsError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT interview_id::text AS subject_id, evaluator_id, score
            FROM evaluations
            WHERE organization_id = $1
              AND ($2::uuid IS NULL OR assessment_id = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(assessment_id.map(|id| *id.as_uuid()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EvaluationRecord::try_from).collect()
    }

    async fn fetch_evaluator_scores(
        &self,
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
    ) -> Result<Vec<EvaluatorScore>, AnalyticsError> {
        let rows = sqlx::query_as::<_, EvaluatorScoreRow>(
            r#"
            SELECT evaluator_id, evaluator_name, score
            FROM evaluations
            WHERE organization_id = $1
              AND ($2::uuid IS NULL OR assessment_id = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(assessment_id.map(|id| *id.as_uuid()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EvaluatorScore::try_from).collect()
    }

    async fn fetch_demographic_groups(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DemographicGroup>, AnalyticsError> {
        // Only decided candidates count toward pass rates.
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT d.category,
                   d.group_name,
                   COUNT(*) FILTER (WHERE c.outcome = 'pass') AS pass_count,
                   COUNT(*) AS total_count
            FROM candidate_demographics d
            JOIN candidates c ON c.id = d.candidate_id
            WHERE c.organization_id = $1
              AND c.outcome IN ('pass', 'fail')
            GROUP BY d.category, d.group_name
            ORDER BY d.category, d.group_name
            "#,
        )
        .bind(organization_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DemographicGroup::try_from).collect()
    }

    async fn count_evaluations(
        &self,
        organization_id: OrganizationId,
    ) -> Result<u64, AnalyticsError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM evaluations WHERE organization_id = $1")
                .bind(organization_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(count.max(0) as u64)
    }
}
