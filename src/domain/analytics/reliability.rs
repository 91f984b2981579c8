//! Persisted reliability scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::stats::Distribution;
use super::{IccInterpretation, IccResult};
use crate::domain::foundation::{
    AssessmentId, EvaluatorId, OrganizationId, ReliabilityScoreId, Timestamp, ValidationError,
};

/// Storage key used when a score covers every assessment.
pub const ALL_ASSESSMENTS_KEY: &str = "all";

const ORGANIZATION_SCOPE_KEY: &str = "organization";
const EVALUATOR_SCOPE_PREFIX: &str = "evaluator:";

/// Whose agreement a reliability score describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "evaluator_id", rename_all = "snake_case")]
pub enum ReliabilityScope {
    /// All evaluations in the organization.
    Organization,
    /// Only subjects the given evaluator took part in.
    Evaluator(EvaluatorId),
}

impl ReliabilityScope {
    /// Builds the scope from an optional evaluator filter.
    pub fn from_evaluator(evaluator_id: Option<EvaluatorId>) -> Self {
        match evaluator_id {
            Some(id) => ReliabilityScope::Evaluator(id),
            None => ReliabilityScope::Organization,
        }
    }

    /// Returns the storage key for uniqueness checks.
    pub fn key(&self) -> String {
        match self {
            ReliabilityScope::Organization => ORGANIZATION_SCOPE_KEY.to_string(),
            ReliabilityScope::Evaluator(id) => format!("{}{}", EVALUATOR_SCOPE_PREFIX, id),
        }
    }

    /// Parses a storage key.
    pub fn parse_key(key: &str) -> Result<Self, ValidationError> {
        if key == ORGANIZATION_SCOPE_KEY {
            return Ok(ReliabilityScope::Organization);
        }
        match key.strip_prefix(EVALUATOR_SCOPE_PREFIX) {
            Some(id) => Ok(ReliabilityScope::Evaluator(EvaluatorId::new(id)?)),
            None => Err(ValidationError::invalid_format(
                "scope_key",
                format!("unknown scope '{}'", key),
            )),
        }
    }
}

impl fmt::Display for ReliabilityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A stored ICC for one (organization, assessment, scope).
///
/// Recalculating the same scope replaces the stored values in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityScore {
    pub id: ReliabilityScoreId,
    pub organization_id: OrganizationId,
    pub assessment_id: Option<AssessmentId>,
    pub scope: ReliabilityScope,
    pub icc: f64,
    pub interpretation: IccInterpretation,
    pub mean_score: f64,
    pub std_dev: f64,
    pub sample_size: usize,
    pub calculated_at: Timestamp,
}

impl ReliabilityScore {
    /// Creates a score from a finished calculation.
    pub fn from_calculation(
        organization_id: OrganizationId,
        assessment_id: Option<AssessmentId>,
        scope: ReliabilityScope,
        icc: &IccResult,
        scores: &Distribution,
        calculated_at: Timestamp,
    ) -> Self {
        Self {
            id: ReliabilityScoreId::new(),
            organization_id,
            assessment_id,
            scope,
            icc: icc.icc,
            interpretation: icc.interpretation(),
            mean_score: scores.mean,
            std_dev: scores.std_dev,
            sample_size: scores.count,
            calculated_at,
        }
    }

    /// Storage key for the assessment dimension.
    pub fn assessment_key(&self) -> String {
        assessment_key(self.assessment_id.as_ref())
    }

    /// Returns true if both scores describe the same (org, assessment, scope).
    pub fn same_scope_as(&self, other: &ReliabilityScore) -> bool {
        self.organization_id == other.organization_id
            && self.assessment_id == other.assessment_id
            && self.scope == other.scope
    }
}

/// Storage key for an optional assessment filter.
pub fn assessment_key(assessment_id: Option<&AssessmentId>) -> String {
    assessment_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| ALL_ASSESSMENTS_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_icc() -> IccResult {
        IccResult {
            icc: 0.82,
            mean_square_between: 4.0,
            mean_square_within: 0.4,
            num_subjects: 3,
            num_raters: 2,
            grand_mean: 3.2,
            average_raters_per_subject: 2.0,
        }
    }

    #[test]
    fn scope_keys_round_trip() {
        let evaluator = ReliabilityScope::Evaluator(EvaluatorId::new("e-7").unwrap());
        assert_eq!(evaluator.key(), "evaluator:e-7");
        assert_eq!(ReliabilityScope::parse_key("evaluator:e-7").unwrap(), evaluator);
        assert_eq!(
            ReliabilityScope::parse_key("organization").unwrap(),
            ReliabilityScope::Organization
        );
    }

    #[test]
    fn unknown_scope_key_is_rejected() {
        assert!(ReliabilityScope::parse_key("team:9").is_err());
        assert!(ReliabilityScope::parse_key("evaluator:").is_err());
    }

    #[test]
    fn from_calculation_copies_statistics() {
        let scores = Distribution::of(vec![3.0, 4.0, 2.0, 5.0]).unwrap();
        let score = ReliabilityScore::from_calculation(
            OrganizationId::new(),
            None,
            ReliabilityScope::Organization,
            &sample_icc(),
            &scores,
            Timestamp::now(),
        );

        assert_eq!(score.icc, 0.82);
        assert_eq!(score.interpretation, IccInterpretation::Good);
        assert_eq!(score.mean_score, 3.5);
        assert_eq!(score.sample_size, 4);
        assert_eq!(score.assessment_key(), ALL_ASSESSMENTS_KEY);
    }

    #[test]
    fn same_scope_ignores_values() {
        let org = OrganizationId::new();
        let scores = Distribution::of(vec![1.0, 2.0]).unwrap();
        let a = ReliabilityScore::from_calculation(
            org,
            None,
            ReliabilityScope::Organization,
            &sample_icc(),
            &scores,
            Timestamp::now(),
        );
        let mut b = a.clone();
        b.id = ReliabilityScoreId::new();
        b.icc = 0.1;

        assert!(a.same_scope_as(&b));

        b.assessment_id = Some(AssessmentId::new());
        assert!(!a.same_scope_as(&b));
    }

    #[test]
    fn scope_serializes_with_tag() {
        let json = serde_json::to_value(ReliabilityScope::Organization).unwrap();
        assert_eq!(json["kind"], "organization");
    }
}
