//! GetReliabilityHistoryHandler - Query handler for stored reliability scores.

use std::sync::Arc;

use crate::domain::analytics::ReliabilityScore;
use crate::domain::foundation::OrganizationId;
use crate::ports::{AnalyticsError, ReliabilityScoreRepository};

/// Upper bound on history entries returned by one query.
pub const MAX_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct GetReliabilityHistoryQuery {
    pub organization_id: OrganizationId,
    /// Requested entry count; the configured default when None.
    pub limit: Option<usize>,
}

pub type GetReliabilityHistoryResult = Vec<ReliabilityScore>;

pub struct GetReliabilityHistoryHandler {
    repository: Arc<dyn ReliabilityScoreRepository>,
    default_limit: usize,
}

impl GetReliabilityHistoryHandler {
    pub fn new(repository: Arc<dyn ReliabilityScoreRepository>, default_limit: usize) -> Self {
        Self {
            repository,
            default_limit,
        }
    }

    pub async fn handle(
        &self,
        query: GetReliabilityHistoryQuery,
    ) -> Result<GetReliabilityHistoryResult, AnalyticsError> {
        let limit = clamp_history_limit(query.limit.unwrap_or(self.default_limit));
        self.repository
            .list_recent(query.organization_id, limit)
            .await
    }
}

/// Clamps a requested history size into `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_HISTORY_LIMIT)
}
