//! Rating Matrix - sparse subject x rater table for agreement analysis.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::EvaluationRecord;
use crate::domain::foundation::{EvaluatorId, Score, SubjectId};

/// Sparse table mapping subject -> rater -> score.
///
/// A missing cell means the rater did not rate that subject; it is never
/// read as zero. Both levels are ordered maps so every traversal, and
/// therefore every floating-point summation downstream, happens in the
/// same order for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingMatrix {
    subjects: BTreeMap<SubjectId, BTreeMap<EvaluatorId, Score>>,
}

impl RatingMatrix {
    /// Creates an empty matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a matrix.
    pub fn builder() -> RatingMatrixBuilder {
        RatingMatrixBuilder::new()
    }

    /// Builds a matrix from flat evaluation records.
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        RatingMatrixBuilder::new().records(records).build()
    }

    /// Gets a single cell.
    pub fn get(&self, subject_id: &SubjectId, rater_id: &EvaluatorId) -> Option<Score> {
        self.subjects
            .get(subject_id)
            .and_then(|row| row.get(rater_id))
            .copied()
    }

    /// Returns the ratings recorded for one subject.
    pub fn ratings_for(&self, subject_id: &SubjectId) -> Option<&BTreeMap<EvaluatorId, Score>> {
        self.subjects.get(subject_id)
    }

    /// Iterates subjects with their ratings in subject order.
    pub fn rows(&self) -> impl Iterator<Item = (&SubjectId, &BTreeMap<EvaluatorId, Score>)> {
        self.subjects.iter()
    }

    /// Returns every rater observed across all subjects.
    pub fn rater_ids(&self) -> BTreeSet<&EvaluatorId> {
        self.subjects.values().flat_map(|row| row.keys()).collect()
    }

    /// Returns true if the matrix has no subjects.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Returns the number of subjects.
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Returns the number of filled cells.
    pub fn rating_count(&self) -> usize {
        self.subjects.values().map(BTreeMap::len).sum()
    }
}

/// Builder for constructing RatingMatrix instances.
///
/// A repeated (subject, rater) pair overwrites the earlier cell: the last
/// write in iteration order wins.
#[derive(Debug, Default)]
pub struct RatingMatrixBuilder {
    subjects: BTreeMap<SubjectId, BTreeMap<EvaluatorId, Score>>,
}

impl RatingMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single rating.
    pub fn rating(mut self, subject_id: SubjectId, rater_id: EvaluatorId, score: Score) -> Self {
        self.subjects
            .entry(subject_id)
            .or_default()
            .insert(rater_id, score);
        self
    }

    /// Adds every record in order.
    pub fn records<'a, I>(self, records: I) -> Self
    where
        I: IntoIterator<Item = &'a EvaluationRecord>,
    {
        records.into_iter().fold(self, |builder, record| {
            builder.rating(
                record.subject_id.clone(),
                record.rater_id.clone(),
                record.score,
            )
        })
    }

    /// Builds the matrix.
    pub fn build(self) -> RatingMatrix {
        RatingMatrix {
            subjects: self.subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: &str) -> SubjectId {
        SubjectId::new(id).unwrap()
    }

    fn rater(id: &str) -> EvaluatorId {
        EvaluatorId::new(id).unwrap()
    }

    fn record(s: &str, r: &str, score: i32) -> EvaluationRecord {
        EvaluationRecord::new(subject(s), rater(r), Score::from_raw(score))
    }

    #[test]
    fn empty_records_build_empty_matrix() {
        let matrix = RatingMatrix::from_records(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.subject_count(), 0);
        assert_eq!(matrix.rating_count(), 0);
    }

    #[test]
    fn records_are_grouped_by_subject_then_rater() {
        let matrix = RatingMatrix::from_records(&[
            record("s1", "a", 4),
            record("s1", "b", 5),
            record("s2", "a", 2),
        ]);

        assert_eq!(matrix.subject_count(), 2);
        assert_eq!(matrix.rating_count(), 3);
        assert_eq!(matrix.get(&subject("s1"), &rater("b")), Some(Score::from_raw(5)));
        assert_eq!(matrix.ratings_for(&subject("s2")).unwrap().len(), 1);
    }

    #[test]
    fn missing_cell_is_none_not_zero() {
        let matrix = RatingMatrix::from_records(&[record("s1", "a", 4), record("s2", "b", 3)]);
        assert!(matrix.get(&subject("s1"), &rater("b")).is_none());
    }

    #[test]
    fn duplicate_pair_last_write_wins() {
        let matrix = RatingMatrix::from_records(&[
            record("s1", "a", 1),
            record("s1", "a", 5),
        ]);

        assert_eq!(matrix.rating_count(), 1);
        assert_eq!(matrix.get(&subject("s1"), &rater("a")), Some(Score::from_raw(5)));
    }

    #[test]
    fn rater_ids_cover_all_subjects() {
        let matrix = RatingMatrix::builder()
            .rating(subject("s1"), rater("a"), Score::from_raw(3))
            .rating(subject("s2"), rater("b"), Score::from_raw(3))
            .rating(subject("s2"), rater("a"), Score::from_raw(3))
            .build();

        let raters: Vec<&str> = matrix.rater_ids().into_iter().map(|r| r.as_str()).collect();
        assert_eq!(raters, vec!["a", "b"]);
    }

    #[test]
    fn input_order_does_not_change_matrix() {
        let forward = RatingMatrix::from_records(&[record("s1", "a", 4), record("s2", "b", 2)]);
        let reverse = RatingMatrix::from_records(&[record("s2", "b", 2), record("s1", "a", 4)]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn matrix_serializes_as_nested_object() {
        let matrix = RatingMatrix::from_records(&[record("s1", "a", 4)]);
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["s1"]["a"], 4);
    }
}
