//! Persisted adverse-impact reports.

use serde::{Deserialize, Serialize};

use super::AdverseImpactResult;
use crate::domain::foundation::{BiasReportId, OrganizationId, Timestamp};

/// Snapshot of an adverse-impact run across every demographic category.
///
/// Stored as an opaque blob; only the generation timestamp is queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub id: BiasReportId,
    pub organization_id: OrganizationId,
    pub generated_at: Timestamp,
    pub results: Vec<AdverseImpactResult>,
}

impl BiasReport {
    /// Creates a new report.
    pub fn new(
        organization_id: OrganizationId,
        results: Vec<AdverseImpactResult>,
        generated_at: Timestamp,
    ) -> Self {
        Self {
            id: BiasReportId::new(),
            organization_id,
            generated_at,
            results,
        }
    }

    /// Number of flagged groups across all categories.
    pub fn flagged_group_count(&self) -> usize {
        self.results.iter().map(|r| r.flagged_groups().count()).sum()
    }

    /// Categories with at least one flagged group.
    pub fn flagged_categories(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.has_adverse_impact())
            .map(|r| r.category.as_str())
            .collect()
    }
}
