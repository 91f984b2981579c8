//! Input records consumed by the analytics components.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EvaluatorId, Score, SubjectId};

/// One scored judgment: an evaluator's score for a subject (interview).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub subject_id: SubjectId,
    pub rater_id: EvaluatorId,
    pub score: Score,
}

impl EvaluationRecord {
    /// Creates a new evaluation record.
    pub fn new(subject_id: SubjectId, rater_id: EvaluatorId, score: Score) -> Self {
        Self {
            subject_id,
            rater_id,
            score,
        }
    }
}

/// A score attributed to a named evaluator, used for leniency analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorScore {
    pub evaluator_id: EvaluatorId,
    pub evaluator_name: String,
    pub score: Score,
}

impl EvaluatorScore {
    /// Creates a new evaluator score.
    pub fn new(evaluator_id: EvaluatorId, evaluator_name: impl Into<String>, score: Score) -> Self {
        Self {
            evaluator_id,
            evaluator_name: evaluator_name.into(),
            score,
        }
    }
}
