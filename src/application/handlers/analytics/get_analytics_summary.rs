//! GetAnalyticsSummaryHandler - Query handler for the organization overview.
//!
//! Fetches reliability history, evaluation count, evaluator scores and the
//! latest adverse-impact report concurrently. The report is optional: its
//! failure is logged and the summary is returned without it.

use std::sync::Arc;

use tracing::{debug, warn};

use super::get_reliability_history::clamp_history_limit;
use crate::domain::analytics::{AnalyticsSummary, EvaluatorBiasAnalyzer};
use crate::domain::foundation::{OrganizationId, Timestamp};
use crate::ports::{
    AnalyticsError, BiasReportRepository, EvaluationReader, ReliabilityScoreRepository,
};

#[derive(Debug, Clone)]
pub struct GetAnalyticsSummaryQuery {
    pub organization_id: OrganizationId,
}

pub type GetAnalyticsSummaryResult = AnalyticsSummary;

pub struct GetAnalyticsSummaryHandler {
    reader: Arc<dyn EvaluationReader>,
    reliability: Arc<dyn ReliabilityScoreRepository>,
    reports: Arc<dyn BiasReportRepository>,
    history_limit: usize,
}

impl GetAnalyticsSummaryHandler {
    pub fn new(
        reader: Arc<dyn EvaluationReader>,
        reliability: Arc<dyn ReliabilityScoreRepository>,
        reports: Arc<dyn BiasReportRepository>,
        history_limit: usize,
    ) -> Self {
        Self {
            reader,
            reliability,
            reports,
            history_limit: clamp_history_limit(history_limit),
        }
    }

    pub async fn handle(
        &self,
        query: GetAnalyticsSummaryQuery,
    ) -> Result<GetAnalyticsSummaryResult, AnalyticsError> {
        let org = query.organization_id;

        let (history, total, scores, latest_report) = futures::join!(
            self.reliability.list_recent(org, self.history_limit),
            self.reader.count_evaluations(org),
            self.reader.fetch_evaluator_scores(org, None),
            self.reports.find_latest(org),
        );

        let history = history?;
        let total = total?;
        let scores = scores?;
        let latest_report = latest_report.unwrap_or_else(|err| {
            warn!(organization_id = %org, error = %err, "Failed to load latest bias report");
            None
        });

        let bias = EvaluatorBiasAnalyzer::analyze(&scores);
        let summary =
            AnalyticsSummary::assemble(org, total, history, bias, latest_report, Timestamp::now());

        debug!(
            organization_id = %org,
            total_evaluations = summary.total_evaluations,
            flagged_evaluators = summary.flagged_evaluators(),
            has_report = summary.latest_adverse_impact.is_some(),
            "Analytics summary assembled"
        );

        Ok(summary)
    }
}
