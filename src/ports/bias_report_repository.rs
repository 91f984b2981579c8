use async_trait::async_trait;

use super::AnalyticsError;
use crate::domain::analytics::BiasReport;
use crate::domain::foundation::OrganizationId;

/// Persistence port for adverse-impact reports.
#[async_trait]
pub trait BiasReportRepository: Send + Sync {
    /// Appends a report.
    async fn save(&self, report: &BiasReport) -> Result<(), AnalyticsError>;

    /// Gets the most recently generated report.
    async fn find_latest(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<BiasReport>, AnalyticsError>;
}
