//! In-Memory Analytics Store
//!
//! Holds evaluations, demographic counts and computed results in memory.
//! Implements every analytics port; useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analytics::{
    BiasReport, DemographicGroup, EvaluationRecord, EvaluatorScore, ReliabilityScore,
};
use crate::domain::foundation::{AssessmentId, EvaluatorId, OrganizationId, Score, SubjectId};
use crate::ports::{
    AnalyticsError, BiasReportRepository, EvaluationReader, ReliabilityScoreRepository,
};

/// One recorded evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvaluation {
    pub organization_id: OrganizationId,
    pub assessment_id: Option<AssessmentId>,
    pub subject_id: SubjectId,
    pub evaluator_id: EvaluatorId,
    pub evaluator_name: String,
    pub score: Score,
}

impl StoredEvaluation {
    fn matches(&self, organization_id: OrganizationId, assessment_id: Option<AssessmentId>) -> bool {
        self.organization_id == organization_id
            && assessment_id.map_or(true, |id| self.assessment_id == Some(id))
    }
}

/// In-memory implementation of all analytics ports.
#[derive(Debug, Clone)]
pub struct InMemoryAnalyticsStore {
    evaluations: Arc<RwLock<Vec<StoredEvaluation>>>,
    demographics: Arc<RwLock<HashMap<OrganizationId, Vec<DemographicGroup>>>>,
    scores: Arc<RwLock<Vec<ReliabilityScore>>>,
    reports: Arc<RwLock<Vec<BiasReport>>>,
}

impl InMemoryAnalyticsStore {
    pub fn new() -> Self {
        Self {
            evaluations: Arc::new(RwLock::new(Vec::new())),
            demographics: Arc::new(RwLock::new(HashMap::new())),
            scores: Arc::new(RwLock::new(Vec::new())),
            reports: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Records an evaluation.
    pub async fn add_evaluation(&self, evaluation: StoredEvaluation) {
        self.evaluations.write().await.push(evaluation);
    }

    /// Records pre-aggregated pass counts for a demographic group.
    pub async fn add_demographic_group(
        &self,
        organization_id: OrganizationId,
        group: DemographicGroup,
    ) {
        self.demographics
            .write()
            .await
            .entry(organization_id)
            .or_default()
            .push(group);
    }

    /// Number of stored reliability scores across all organizations.
    pub async fn score_count(&self) -> usize {
        self.scores.read().await.len()
    }

    /// Number of stored bias reports across all organizations.
    pub async fn report_count(&self) -> usize {
        self.reports.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.evaluations.write().await.clear();
        self.demographics.write().await.clear();
        self.scores.write().await.clear();
        self.reports.write().await.clear();
    }
}

impl Default for InMemoryAnalyticsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvaluationReader for InMemoryAnalyticsStore {
    async fn fetch_evaluation_records(
        &self,
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
    ) -> Result<Vec<EvaluationRecord>, AnalyticsError> {
        let evaluations = self.evaluations.read().await;
        Ok(evaluations
            .iter()
            .filter(|e| e.matches(organization_id, assessment_id))
            .map(|e| EvaluationRecord::new(e.subject_id.clone(), e.evaluator_id.clone(), e.score))
            .collect())
    }

    async fn fetch_evaluator_scores(
        &self,
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
    ) -> Result<Vec<EvaluatorScore>, AnalyticsError> {
        let evaluations = self.evaluations.read().await;
        Ok(evaluations
            .iter()
            .filter(|e| e.matches(organization_id, assessment_id))
            .map(|e| EvaluatorScore::new(e.evaluator_id.clone(), e.evaluator_name.clone(), e.score))
            .collect())
    }

    async fn fetch_demographic_groups(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DemographicGroup>, AnalyticsError> {
        let demographics = self.demographics.read().await;
        Ok(demographics
            .get(&organization_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn count_evaluations(
        &self,
        organization_id: OrganizationId,
    ) -> Result<u64, AnalyticsError> {
        let evaluations = self.evaluations.read().await;
        Ok(evaluations
            .iter()
            .filter(|e| e.organization_id == organization_id)
            .count() as u64)
    }
}

#[async_trait]
impl ReliabilityScoreRepository for InMemoryAnalyticsStore {
    async fn upsert(&self, score: &ReliabilityScore) -> Result<ReliabilityScore, AnalyticsError> {
        let mut scores = self.scores.write().await;
        match scores.iter_mut().find(|s| s.same_scope_as(score)) {
            Some(existing) => {
                let id = existing.id;
                *existing = ReliabilityScore {
                    id,
                    ..score.clone()
                };
                Ok(existing.clone())
            }
            None => {
                scores.push(score.clone());
                Ok(score.clone())
            }
        }
    }

    async fn list_recent(
        &self,
        organization_id: OrganizationId,
        limit: usize,
    ) -> Result<Vec<ReliabilityScore>, AnalyticsError> {
        let scores = self.scores.read().await;
        let mut matching: Vec<ReliabilityScore> = scores
            .iter()
            .filter(|s| s.organization_id == organization_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.calculated_at.cmp(&a.calculated_at));
        matching.truncate(limit);
        Ok(matching)
    }
}

#[async_trait]
impl BiasReportRepository for InMemoryAnalyticsStore {
    async fn save(&self, report: &BiasReport) -> Result<(), AnalyticsError> {
        self.reports.write().await.push(report.clone());
        Ok(())
    }

    async fn find_latest(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<BiasReport>, AnalyticsError> {
        let reports = self.reports.read().await;
        Ok(reports
            .iter()
            .filter(|r| r.organization_id == organization_id)
            .max_by_key(|r| r.generated_at)
            .cloned())
    }
}
