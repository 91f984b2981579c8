use async_trait::async_trait;

use super::AnalyticsError;
use crate::domain::analytics::ReliabilityScore;
use crate::domain::foundation::OrganizationId;

/// Persistence port for computed reliability scores.
#[async_trait]
pub trait ReliabilityScoreRepository: Send + Sync {
    /// Stores a score, replacing any existing score for the same
    /// (organization, assessment, scope). Returns the stored row, which keeps
    /// the original id when an existing row was updated.
    async fn upsert(&self, score: &ReliabilityScore) -> Result<ReliabilityScore, AnalyticsError>;

    /// Lists an organization's scores, newest first.
    async fn list_recent(
        &self,
        organization_id: OrganizationId,
        limit: usize,
    ) -> Result<Vec<ReliabilityScore>, AnalyticsError>;
}
