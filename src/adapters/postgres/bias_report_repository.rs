//! PostgreSQL implementation of BiasReportRepository.
//!
//! Report results are stored as one JSONB blob per report.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::analytics::{AdverseImpactResult, BiasReport};
use crate::domain::foundation::{BiasReportId, OrganizationId, Timestamp};
use crate::ports::{AnalyticsError, BiasReportRepository};

#[derive(Clone)]
pub struct PostgresBiasReportRepository {
    pool: PgPool,
}

impl PostgresBiasReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BiasReportRow {
    id: Uuid,
    organization_id: Uuid,
    results: JsonValue,
    generated_at: DateTime<Utc>,
}

impl TryFrom<BiasReportRow> for BiasReport {
    type Error = AnalyticsError;

    fn try_from(row: BiasReportRow) -> Result<Self, Self::Error> {
        let results: Vec<AdverseImpactResult> = serde_json::from_value(row.results)?;
        Ok(BiasReport {
            id: BiasReportId::from_uuid(row.id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            generated_at: Timestamp::from_datetime(row.generated_at),
            results,
        })
    }
}

#[async_trait]
impl BiasReportRepository for PostgresBiasReportRepository {
    async fn save(&self, report: &BiasReport) -> Result<(), AnalyticsError> {
        let results = serde_json::to_value(&report.results)?;

        sqlx::query(
            r#"
            INSERT INTO bias_reports (id, organization_id, results, generated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.organization_id.as_uuid())
        .bind(results)
        .bind(report.generated_at.as_datetime())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_latest(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<BiasReport>, AnalyticsError> {
        let row = sqlx::query_as::<_, BiasReportRow>(
            r#"
            SELECT id, organization_id, results, generated_at
            FROM bias_reports
            WHERE organization_id = $1
            ORDER BY generated_at DESC
            LIMIT 1
            "#,
        )
        .bind(organization_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BiasReport::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::{AdverseImpactAnalyzer, DemographicGroup};

    #[test]
    fn row_round_trips_results_blob() {
        let results = AdverseImpactAnalyzer::analyze_by_category(&[
            DemographicGroup::new("A", "gender", 18, 20),
            DemographicGroup::new("B", "gender", 14, 20),
        ]);
        let row = BiasReportRow {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            results: serde_json::to_value(&results).unwrap(),
            generated_at: Utc::now(),
        };

        let report = BiasReport::try_from(row).unwrap();

        assert_eq!(report.results, results);
    }

    #[test]
    fn corrupt_blob_is_serialization_error() {
        let row = BiasReportRow {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            results: serde_json::json!({"not": "a list"}),
            generated_at: Utc::now(),
        };

        assert!(matches!(
            BiasReport::try_from(row),
            Err(AnalyticsError::Serialization(_))
        ));
    }
}
