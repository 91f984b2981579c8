//! GenerateAdverseImpactReportHandler - Command handler for four-fifths rule reports.
//!
//! Runs the adverse-impact analysis for every demographic category the
//! organization has data for and stores the results as one report.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::analytics::{AdverseImpactAnalyzer, BiasReport};
use crate::domain::foundation::{OrganizationId, Timestamp};
use crate::ports::{AnalyticsError, BiasReportRepository, EvaluationReader};

/// Command to generate an adverse-impact report.
#[derive(Debug, Clone)]
pub struct GenerateAdverseImpactReportCommand {
    pub organization_id: OrganizationId,
}

/// Outcome of report generation.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateAdverseImpactReportResult {
    Generated(BiasReport),
    /// No category had two groups with sufficient samples.
    InsufficientData,
}

pub struct GenerateAdverseImpactReportHandler {
    reader: Arc<dyn EvaluationReader>,
    repository: Arc<dyn BiasReportRepository>,
}

impl GenerateAdverseImpactReportHandler {
    pub fn new(
        reader: Arc<dyn EvaluationReader>,
        repository: Arc<dyn BiasReportRepository>,
    ) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(
        &self,
        cmd: GenerateAdverseImpactReportCommand,
    ) -> Result<GenerateAdverseImpactReportResult, AnalyticsError> {
        let groups = self
            .reader
            .fetch_demographic_groups(cmd.organization_id)
            .await?;

        let results = AdverseImpactAnalyzer::analyze_by_category(&groups);
        if results.is_empty() {
            debug!(
                organization_id = %cmd.organization_id,
                groups = groups.len(),
                "No category eligible for adverse impact analysis"
            );
            return Ok(GenerateAdverseImpactReportResult::InsufficientData);
        }

        let report = BiasReport::new(cmd.organization_id, results, Timestamp::now());
        self.repository.save(&report).await?;

        info!(
            organization_id = %report.organization_id,
            report_id = %report.id,
            categories = report.results.len(),
            flagged_groups = report.flagged_group_count(),
            "Adverse impact report stored"
        );

        Ok(GenerateAdverseImpactReportResult::Generated(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::{DemographicGroup, EvaluationRecord, EvaluatorScore};
    use crate::domain::foundation::AssessmentId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockReader {
        groups: Vec<DemographicGroup>,
    }

    #[async_trait]
    impl EvaluationReader for MockReader {
        async fn fetch_evaluation_records(
            &self,
            _organization_id: OrganizationId,
            _assessment_id: Option<AssessmentId>,
        ) -> Result<Vec<EvaluationRecord>, AnalyticsError> {
            Ok(vec![])
        }

        async fn fetch_evaluator_scores(
            &self,
            _organization_id: OrganizationId,
            _assessment_id: Option<AssessmentId>,
        ) -> Result<Vec<EvaluatorScore>, AnalyticsError> {
            Ok(vec![])
        }

        async fn fetch_demographic_groups(
            &self,
            _organization_id: OrganizationId,
        ) -> Result<Vec<DemographicGroup>, AnalyticsError> {
            Ok(self.groups.clone())
        }

        async fn count_evaluations(
            &self,
            _organization_id: OrganizationId,
        ) -> Result<u64, AnalyticsError> {
            Ok(0)
        }
    }

    #[derive(Default)]
    struct MockReportRepository {
        saved: Mutex<Vec<BiasReport>>,
    }

    #[async_trait]
    impl BiasReportRepository for MockReportRepository {
        async fn save(&self, report: &BiasReport) -> Result<(), AnalyticsError> {
            self.saved.lock().unwrap().push(report.clone());
            Ok(())
        }

        async fn find_latest(
            &self,
            _organization_id: OrganizationId,
        ) -> Result<Option<BiasReport>, AnalyticsError> {
            Ok(self.saved.lock().unwrap().last().cloned())
        }
    }

    fn group(category: &str, name: &str, pass: u32, total: u32) -> DemographicGroup {
        DemographicGroup::new(name, category, pass, total)
    }

    #[tokio::test]
    async fn stores_report_with_flagged_group() {
        let reader = MockReader {
            groups: vec![
                group("gender", "A", 18, 20),
                group("gender", "B", 14, 20),
            ],
        };
        let repository = Arc::new(MockReportRepository::default());
        let handler = GenerateAdverseImpactReportHandler::new(Arc::new(reader), repository.clone());

        let cmd = GenerateAdverseImpactReportCommand {
            organization_id: OrganizationId::new(),
        };
        let result = handler.handle(cmd).await.unwrap();

        let GenerateAdverseImpactReportResult::Generated(report) = result else {
            panic!("Expected Generated");
        };
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].reference_group, "A");
        assert_eq!(report.flagged_group_count(), 1);
        assert_eq!(repository.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn nothing_stored_without_eligible_category() {
        let reader = MockReader {
            groups: vec![
                group("gender", "A", 3, 4),
                group("gender", "B", 14, 20),
                group("ethnicity", "X", 9, 10),
            ],
        };
        let repository = Arc::new(MockReportRepository::default());
        let handler = GenerateAdverseImpactReportHandler::new(Arc::new(reader), repository.clone());

        let cmd = GenerateAdverseImpactReportCommand {
            organization_id: OrganizationId::new(),
        };
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(result, GenerateAdverseImpactReportResult::InsufficientData);
        assert!(repository.saved.lock().unwrap().is_empty());
    }
}
