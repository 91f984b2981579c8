//! Evaluator Bias Analyzer - leniency/strictness against the organization mean.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::stats::{round_to, Distribution};
use super::EvaluatorScore;
use crate::domain::foundation::EvaluatorId;

/// Fraction of the org standard deviation an evaluator must deviate by
/// before being classified as lenient or strict.
pub const BIAS_THRESHOLD_STD_DEV_FACTOR: f64 = 0.5;

/// Threshold in score points when every score is identical.
pub const BIAS_FALLBACK_THRESHOLD: f64 = 0.5;

/// Decimal places for reported numbers.
const REPORT_PRECISION: u32 = 2;

/// Direction of an evaluator's systematic deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasDirection {
    Lenient,
    Strict,
    Neutral,
}

impl BiasDirection {
    /// Classifies a deviation against a symmetric threshold.
    pub fn classify(deviation: f64, threshold: f64) -> Self {
        if deviation > threshold {
            BiasDirection::Lenient
        } else if deviation < -threshold {
            BiasDirection::Strict
        } else {
            BiasDirection::Neutral
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasDirection::Lenient => "lenient",
            BiasDirection::Strict => "strict",
            BiasDirection::Neutral => "neutral",
        }
    }

    /// Returns true unless neutral.
    pub fn is_biased(&self) -> bool {
        !matches!(self, BiasDirection::Neutral)
    }
}

impl fmt::Display for BiasDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-evaluator leniency result. Numeric fields are rounded to two places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorBiasResult {
    pub evaluator_id: EvaluatorId,
    pub evaluator_name: String,
    pub mean_score: f64,
    pub org_mean_score: f64,
    pub deviation: f64,
    pub bias_direction: BiasDirection,
    pub evaluation_count: usize,
}

/// Running totals for one evaluator, in first-appearance order.
struct EvaluatorTally<'a> {
    evaluator_id: &'a EvaluatorId,
    evaluator_name: &'a str,
    sum: f64,
    count: usize,
}

/// Evaluator leniency/strictness analysis.
pub struct EvaluatorBiasAnalyzer;

impl EvaluatorBiasAnalyzer {
    /// Analyzes every evaluator's mean against the organization mean.
    ///
    /// # Algorithm
    /// - org mean / population std dev over all scores
    /// - threshold = 0.5 × std dev, or 0.5 points when std dev is 0
    /// - deviation = evaluator mean − org mean, classified on the
    ///   unrounded value
    ///
    /// # Edge Cases
    /// - Empty input: returns an empty Vec
    /// - One result per distinct evaluator, in order of first appearance;
    ///   the name is taken from that first appearance
    pub fn analyze(scores: &[EvaluatorScore]) -> Vec<EvaluatorBiasResult> {
        let Some(org) = Distribution::of(scores.iter().map(|s| s.score.as_f64())) else {
            return Vec::new();
        };

        let threshold = Self::threshold(org.std_dev);

        let mut tallies: Vec<EvaluatorTally<'_>> = Vec::new();
        let mut index: HashMap<&EvaluatorId, usize> = HashMap::new();
        for entry in scores {
            let slot = *index.entry(&entry.evaluator_id).or_insert_with(|| {
                tallies.push(EvaluatorTally {
                    evaluator_id: &entry.evaluator_id,
                    evaluator_name: &entry.evaluator_name,
                    sum: 0.0,
                    count: 0,
                });
                tallies.len() - 1
            });
            tallies[slot].sum += entry.score.as_f64();
            tallies[slot].count += 1;
        }

        tallies
            .into_iter()
            .map(|tally| {
                let mean = tally.sum / tally.count as f64;
                let deviation = mean - org.mean;
                EvaluatorBiasResult {
                    evaluator_id: tally.evaluator_id.clone(),
                    evaluator_name: tally.evaluator_name.to_string(),
                    mean_score: round_to(mean, REPORT_PRECISION),
                    org_mean_score: round_to(org.mean, REPORT_PRECISION),
                    deviation: round_to(deviation, REPORT_PRECISION),
                    bias_direction: BiasDirection::classify(deviation, threshold),
                    evaluation_count: tally.count,
                }
            })
            .collect()
    }

    /// Classification threshold for a given org standard deviation.
    pub fn threshold(org_std_dev: f64) -> f64 {
        if org_std_dev > 0.0 {
            org_std_dev * BIAS_THRESHOLD_STD_DEV_FACTOR
        } else {
            BIAS_FALLBACK_THRESHOLD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Score;

    fn score(evaluator: &str, value: i32) -> EvaluatorScore {
        EvaluatorScore::new(
            EvaluatorId::new(evaluator).unwrap(),
            format!("Evaluator {}", evaluator),
            Score::from_raw(value),
        )
    }

    fn find<'a>(results: &'a [EvaluatorBiasResult], id: &str) -> &'a EvaluatorBiasResult {
        results
            .iter()
            .find(|r| r.evaluator_id.as_str() == id)
            .unwrap()
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(EvaluatorBiasAnalyzer::analyze(&[]).is_empty());
    }

    #[test]
    fn classifies_lenient_strict_and_neutral() {
        let results = EvaluatorBiasAnalyzer::analyze(&[
            score("e1", 5),
            score("e1", 5),
            score("e2", 1),
            score("e2", 1),
            score("e3", 3),
            score("e3", 3),
        ]);

        assert_eq!(results.len(), 3);

        let e1 = find(&results, "e1");
        assert_eq!(e1.org_mean_score, 3.0);
        assert_eq!(e1.deviation, 2.0);
        assert_eq!(e1.bias_direction, BiasDirection::Lenient);

        let e2 = find(&results, "e2");
        assert_eq!(e2.deviation, -2.0);
        assert_eq!(e2.bias_direction, BiasDirection::Strict);

        let e3 = find(&results, "e3");
        assert_eq!(e3.deviation, 0.0);
        assert_eq!(e3.bias_direction, BiasDirection::Neutral);
        assert_eq!(e3.evaluation_count, 2);
    }

    #[test]
    fn evaluator_at_org_mean_is_neutral() {
        let results = EvaluatorBiasAnalyzer::analyze(&[
            score("e1", 4),
            score("e1", 2),
            score("e2", 3),
            score("e2", 3),
        ]);

        let e2 = find(&results, "e2");
        assert_eq!(e2.deviation, 0.0);
        assert_eq!(e2.bias_direction, BiasDirection::Neutral);
    }

    #[test]
    fn identical_scores_use_fallback_threshold() {
        let results = EvaluatorBiasAnalyzer::analyze(&[score("e1", 4), score("e2", 4)]);
        assert!(results
            .iter()
            .all(|r| r.bias_direction == BiasDirection::Neutral));
        assert_eq!(EvaluatorBiasAnalyzer::threshold(0.0), BIAS_FALLBACK_THRESHOLD);
    }

    #[test]
    fn classification_uses_unrounded_deviation() {
        // org: [1, 2, 2, 2] mean 1.75, std dev ~0.433, threshold ~0.2165
        // e2 mean 2.0, deviation 0.25 > threshold -> lenient
        let results = EvaluatorBiasAnalyzer::analyze(&[
            score("e1", 1),
            score("e2", 2),
            score("e2", 2),
            score("e2", 2),
        ]);

        let e2 = find(&results, "e2");
        assert_eq!(e2.deviation, 0.25);
        assert_eq!(e2.bias_direction, BiasDirection::Lenient);
        assert_eq!(e2.org_mean_score, 1.75);
    }

    #[test]
    fn results_follow_first_appearance_order() {
        let results = EvaluatorBiasAnalyzer::analyze(&[
            score("zed", 3),
            score("amy", 4),
            score("zed", 2),
        ]);

        let ids: Vec<&str> = results.iter().map(|r| r.evaluator_id.as_str()).collect();
        assert_eq!(ids, vec!["zed", "amy"]);
        assert_eq!(results[0].evaluation_count, 2);
        assert_eq!(results[0].evaluator_name, "Evaluator zed");
    }

    #[test]
    fn reported_means_are_rounded_to_two_places() {
        let results = EvaluatorBiasAnalyzer::analyze(&[
            score("e1", 1),
            score("e1", 2),
            score("e1", 2),
        ]);

        assert_eq!(results[0].mean_score, 1.67);
        assert!(results.iter().all(|r| r.mean_score.is_finite()));
    }

    #[test]
    fn bias_direction_serializes_lowercase() {
        let json = serde_json::to_string(&BiasDirection::Lenient).unwrap();
        assert_eq!(json, "\"lenient\"");
    }
}
