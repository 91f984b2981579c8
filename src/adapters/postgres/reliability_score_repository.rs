//! PostgreSQL implementation of ReliabilityScoreRepository.
//!
//! Scores are unique per (organization, assessment key, scope key), so a
//! recalculation updates the stored row instead of adding one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::analytics::{
    IccInterpretation, ReliabilityScope, ReliabilityScore,
};
use crate::domain::foundation::{AssessmentId, OrganizationId, ReliabilityScoreId, Timestamp};
use crate::ports::{AnalyticsError, ReliabilityScoreRepository};

#[derive(Clone)]
pub struct PostgresReliabilityScoreRepository {
    pool: PgPool,
}

impl PostgresReliabilityScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReliabilityScoreRow {
    id: Uuid,
    organization_id: Uuid,
    assessment_id: Option<Uuid>,
    scope_key: String,
    icc: f64,
    interpretation: String,
    mean_score: f64,
    std_dev: f64,
    sample_size: i64,
    calculated_at: DateTime<Utc>,
}

impl TryFrom<ReliabilityScoreRow> for ReliabilityScore {
    type Error = AnalyticsError;

    fn try_from(row: ReliabilityScoreRow) -> Result<Self, Self::Error> {
        let interpretation = IccInterpretation::parse(&row.interpretation).ok_or_else(|| {
            AnalyticsError::Database(format!("Invalid interpretation: {}", row.interpretation))
        })?;
        let sample_size = usize::try_from(row.sample_size).map_err(|_| {
            AnalyticsError::Database(format!("Invalid sample_size: {}", row.sample_size))
        })?;

        Ok(ReliabilityScore {
            id: ReliabilityScoreId::from_uuid(row.id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            assessment_id: row.assessment_id.map(AssessmentId::from_uuid),
            scope: ReliabilityScope::parse_key(&row.scope_key)?,
            icc: row.icc,
            interpretation,
            mean_score: row.mean_score,
            std_dev: row.std_dev,
            sample_size,
            calculated_at: Timestamp::from_datetime(row.calculated_at),
        })
    }
}

const SELECT_COLUMNS: &str = "id, organization_id, assessment_id, scope_key, icc, \
     interpretation, mean_score, std_dev, sample_size, calculated_at";

#[async_trait]
impl ReliabilityScoreRepository for PostgresReliabilityScoreRepository {
    async fn upsert(&self, score: &ReliabilityScore) -> Result<ReliabilityScore, AnalyticsError> {
        let sample_size = i64::try_from(score.sample_size).map_err(|_| {
            AnalyticsError::InvalidInput(format!("sample_size too large: {}", score.sample_size))
        })?;

        let row = sqlx::query_as::<_, ReliabilityScoreRow>(&format!(
            r#"
            INSERT INTO reliability_scores (
                id, organization_id, assessment_id, assessment_key, scope_key,
                icc, interpretation, mean_score, std_dev, sample_size, calculated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (organization_id, assessment_key, scope_key) DO UPDATE SET
                icc = EXCLUDED.icc,
                interpretation = EXCLUDED.interpretation,
                mean_score = EXCLUDED.mean_score,
                std_dev = EXCLUDED.std_dev,
                sample_size = EXCLUDED.sample_size,
                calculated_at = EXCLUDED.calculated_at
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(score.id.as_uuid())
        .bind(score.organization_id.as_uuid())
        .bind(score.assessment_id.map(|id| *id.as_uuid()))
        .bind(score.assessment_key())
        .bind(score.scope.key())
        .bind(score.icc)
        .bind(score.interpretation.as_str())
        .bind(score.mean_score)
        .bind(score.std_dev)
        .bind(sample_size)
        .bind(score.calculated_at.as_datetime())
        .fetch_one(&self.pool)
        .await?;

        ReliabilityScore::try_from(row)
    }

    async fn list_recent(
        &self,
        organization_id: OrganizationId,
        limit: usize,
    ) -> Result<Vec<ReliabilityScore>, AnalyticsError> {
        let rows = sqlx::query_as::<_, ReliabilityScoreRow>(&format!(
            r#"
            SELECT {}
            FROM reliability_scores
            WHERE organization_id = $1
            ORDER BY calculated_at DESC, id
            LIMIT $2
            "#,
            SELECT_COLUMNS
        ))
        .bind(organization_id.as_uuid())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReliabilityScore::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ReliabilityScoreRow {
        ReliabilityScoreRow {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            assessment_id: None,
            scope_key: "evaluator:e-7".to_string(),
            icc: 0.64,
            interpretation: "moderate".to_string(),
            mean_score: 3.1,
            std_dev: 0.9,
            sample_size: 12,
            calculated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_domain() {
        let score = ReliabilityScore::try_from(row()).unwrap();
        assert_eq!(score.interpretation, IccInterpretation::Moderate);
        assert_eq!(score.sample_size, 12);
        assert_eq!(score.assessment_key(), "all");
        assert_eq!(score.scope.key(), "evaluator:e-7");
    }

    #[test]
    fn row_with_unknown_interpretation_fails() {
        let mut bad = row();
        bad.interpretation = "superb".to_string();
        assert!(matches!(
            ReliabilityScore::try_from(bad),
            Err(AnalyticsError::Database(_))
        ));
    }

    #[test]
    fn row_with_unknown_scope_fails() {
        let mut bad = row();
        bad.scope_key = "team:alpha".to_string();
        assert!(matches!(
            ReliabilityScore::try_from(bad),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }
}
