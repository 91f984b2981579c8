//! Property tests for the analytics core.

use proptest::prelude::*;

use hiring_analytics::domain::analytics::{
    AdverseImpactAnalyzer, BiasDirection, DemographicGroup, EvaluationRecord,
    EvaluatorBiasAnalyzer, EvaluatorScore, IccCalculator, RatingMatrix,
};
use hiring_analytics::domain::foundation::{EvaluatorId, Score, SubjectId};

// Strategy: (subject index, rater index, score) triples over small id spaces
// so subjects regularly get several raters.
fn ratings() -> impl Strategy<Value = Vec<(u8, u8, i32)>> {
    prop::collection::vec((0u8..8, 0u8..5, 1i32..=5), 0..60)
}

fn to_records(ratings: &[(u8, u8, i32)]) -> Vec<EvaluationRecord> {
    ratings
        .iter()
        .map(|(subject, rater, score)| {
            EvaluationRecord::new(
                SubjectId::new(format!("s{}", subject)).unwrap(),
                EvaluatorId::new(format!("r{}", rater)).unwrap(),
                Score::try_new(*score).unwrap(),
            )
        })
        .collect()
}

fn to_scores(ratings: &[(u8, u8, i32)]) -> Vec<EvaluatorScore> {
    ratings
        .iter()
        .map(|(_, rater, score)| {
            EvaluatorScore::new(
                EvaluatorId::new(format!("r{}", rater)).unwrap(),
                format!("Rater {}", rater),
                Score::try_new(*score).unwrap(),
            )
        })
        .collect()
}

fn groups() -> impl Strategy<Value = Vec<DemographicGroup>> {
    prop::collection::vec(
        (0u8..3, 0u8..6, 0u32..40).prop_flat_map(|(category, group, total)| {
            (Just(category), Just(group), 0..=total, Just(total))
        }),
        0..12,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(category, group, pass, total)| {
                DemographicGroup::new(format!("g{}", group), format!("c{}", category), pass, total)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn icc_is_idempotent(ratings in ratings()) {
        let matrix = RatingMatrix::from_records(&to_records(&ratings));
        let first = IccCalculator::calculate(&matrix);
        let second = IccCalculator::calculate(&matrix);
        prop_assert_eq!(
            first.map(|r| r.icc.to_bits()),
            second.map(|r| r.icc.to_bits())
        );
    }

    #[test]
    fn matrix_building_is_idempotent(ratings in ratings()) {
        let records = to_records(&ratings);
        let first = RatingMatrix::from_records(&records);
        let second = RatingMatrix::from_records(&records);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.rating_count() <= records.len());
    }

    #[test]
    fn icc_outputs_are_finite(ratings in ratings()) {
        let matrix = RatingMatrix::from_records(&to_records(&ratings));
        if let Some(result) = IccCalculator::calculate(&matrix) {
            prop_assert!(result.icc.is_finite());
            prop_assert!(result.mean_square_between.is_finite());
            prop_assert!(result.mean_square_within.is_finite());
            prop_assert!(result.icc <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn single_rater_subjects_do_not_change_icc(
        ratings in ratings(),
        extra_score in 1i32..=5,
    ) {
        let records = to_records(&ratings);
        let baseline = IccCalculator::calculate(&RatingMatrix::from_records(&records));

        let mut with_singleton = records.clone();
        with_singleton.push(EvaluationRecord::new(
            SubjectId::new("lonely").unwrap(),
            EvaluatorId::new("r0").unwrap(),
            Score::try_new(extra_score).unwrap(),
        ));
        let extended = IccCalculator::calculate(&RatingMatrix::from_records(&with_singleton));

        prop_assert_eq!(
            baseline.map(|r| r.icc.to_bits()),
            extended.map(|r| r.icc.to_bits())
        );
    }

    #[test]
    fn perfect_agreement_gives_icc_of_one(
        subject_scores in prop::collection::vec(1i32..=5, 2..10),
        raters in 2usize..5,
    ) {
        prop_assume!(subject_scores.iter().any(|s| *s != subject_scores[0]));

        let records: Vec<EvaluationRecord> = subject_scores
            .iter()
            .enumerate()
            .flat_map(|(subject, score)| {
                (0..raters).map(move |rater| {
                    EvaluationRecord::new(
                        SubjectId::new(format!("s{}", subject)).unwrap(),
                        EvaluatorId::new(format!("r{}", rater)).unwrap(),
                        Score::try_new(*score).unwrap(),
                    )
                })
            })
            .collect();

        let result = IccCalculator::calculate(&RatingMatrix::from_records(&records)).unwrap();
        prop_assert!((result.icc - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bias_analysis_is_idempotent_and_finite(ratings in ratings()) {
        let scores = to_scores(&ratings);
        let first = EvaluatorBiasAnalyzer::analyze(&scores);
        let second = EvaluatorBiasAnalyzer::analyze(&scores);
        prop_assert_eq!(&first, &second);
        for result in &first {
            prop_assert!(result.mean_score.is_finite());
            prop_assert!(result.deviation.is_finite());
        }
    }

    #[test]
    fn evaluator_at_org_mean_is_neutral(score in 1i32..=5, count in 1usize..10) {
        let scores: Vec<EvaluatorScore> = (0..count)
            .flat_map(|i| {
                [
                    EvaluatorScore::new(EvaluatorId::new("steady").unwrap(), "Steady", Score::try_new(score).unwrap()),
                    EvaluatorScore::new(EvaluatorId::new(format!("peer{}", i)).unwrap(), "Peer", Score::try_new(score).unwrap()),
                ]
            })
            .collect();

        let results = EvaluatorBiasAnalyzer::analyze(&scores);
        prop_assert_eq!(results[0].deviation, 0.0);
        prop_assert_eq!(results[0].bias_direction, BiasDirection::Neutral);
    }

    #[test]
    fn adverse_impact_is_idempotent(groups in groups()) {
        let first = AdverseImpactAnalyzer::analyze_by_category(&groups);
        let second = AdverseImpactAnalyzer::analyze_by_category(&groups);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn adverse_impact_drops_small_groups_and_stays_finite(groups in groups()) {
        for result in AdverseImpactAnalyzer::analyze_by_category(&groups) {
            prop_assert!(result.groups.len() >= 2);
            for group in &result.groups {
                prop_assert!(group.total_count >= 5);
                prop_assert!(group.impact_ratio.is_finite());
                prop_assert!(group.pass_rate.is_finite());
            }
        }
    }
}
