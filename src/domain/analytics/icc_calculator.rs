//! ICC Calculator - Inter-rater agreement via the intraclass correlation.
//!
//! Implements a one-way random-effects ICC for unbalanced designs: raters
//! are not assumed to be the same panel across subjects, and not every
//! rater scores every subject.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::RatingMatrix;

/// Minimum ratings a subject needs to carry agreement information.
pub const MIN_RATERS_PER_SUBJECT: usize = 2;

/// Minimum number of qualifying subjects for a meaningful ICC.
pub const MIN_SUBJECTS: usize = 2;

/// Output of an ICC calculation. All fields are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IccResult {
    /// The coefficient. Usually in [-1, 1] but negative or out-of-range
    /// values are legitimate outcomes, not errors.
    pub icc: f64,
    pub mean_square_between: f64,
    pub mean_square_within: f64,
    /// Subjects with at least two ratings.
    pub num_subjects: usize,
    /// Distinct raters across the qualifying subjects.
    pub num_raters: usize,
    pub grand_mean: f64,
    /// The `k` used in the formula: ratings / qualifying subjects.
    pub average_raters_per_subject: f64,
}

impl IccResult {
    /// Returns the human-readable band for this coefficient.
    pub fn interpretation(&self) -> IccInterpretation {
        IccInterpretation::from_icc(self.icc)
    }
}

/// Fixed interpretation bands for an ICC value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IccInterpretation {
    Poor,
    Fair,
    Moderate,
    Good,
    Excellent,
}

impl IccInterpretation {
    /// Maps a coefficient onto its band.
    pub fn from_icc(icc: f64) -> Self {
        if icc < 0.4 {
            IccInterpretation::Poor
        } else if icc < 0.6 {
            IccInterpretation::Fair
        } else if icc < 0.75 {
            IccInterpretation::Moderate
        } else if icc < 0.9 {
            IccInterpretation::Good
        } else {
            IccInterpretation::Excellent
        }
    }

    /// Returns the wire/storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IccInterpretation::Poor => "poor",
            IccInterpretation::Fair => "fair",
            IccInterpretation::Moderate => "moderate",
            IccInterpretation::Good => "good",
            IccInterpretation::Excellent => "excellent",
        }
    }

    /// Parses a stored name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "poor" => Some(IccInterpretation::Poor),
            "fair" => Some(IccInterpretation::Fair),
            "moderate" => Some(IccInterpretation::Moderate),
            "good" => Some(IccInterpretation::Good),
            "excellent" => Some(IccInterpretation::Excellent),
            _ => None,
        }
    }
}

impl fmt::Display for IccInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Intraclass correlation calculator.
pub struct IccCalculator;

impl IccCalculator {
    /// Calculates the one-way random-effects ICC for a rating matrix.
    ///
    /// # Algorithm
    /// Over subjects with at least two ratings (N ratings, n subjects):
    /// - MSB = Σ nᵢ(x̄ᵢ − x̄)² / (n − 1)
    /// - MSW = ΣΣ (xᵢⱼ − x̄ᵢ)² / (N − n)
    /// - k = N / n
    /// - ICC = (MSB − MSW) / (MSB + (k − 1)·MSW)
    ///
    /// # Edge Cases
    /// Returns `None` (insufficient data) when:
    /// - fewer than two subjects have two or more ratings
    /// - fewer than two distinct raters remain
    /// - total variance is zero (MSB + MSW == 0)
    pub fn calculate(matrix: &RatingMatrix) -> Option<IccResult> {
        let included: Vec<Vec<f64>> = matrix
            .rows()
            .filter(|(_, ratings)| ratings.len() >= MIN_RATERS_PER_SUBJECT)
            .map(|(_, ratings)| ratings.values().map(|s| s.as_f64()).collect())
            .collect();

        if included.len() < MIN_SUBJECTS {
            return None;
        }

        let raters: BTreeSet<_> = matrix
            .rows()
            .filter(|(_, ratings)| ratings.len() >= MIN_RATERS_PER_SUBJECT)
            .flat_map(|(_, ratings)| ratings.keys())
            .collect();
        if raters.len() < 2 {
            return None;
        }

        let num_subjects = included.len();
        let total_ratings: usize = included.iter().map(Vec::len).sum();

        let grand_sum: f64 = included.iter().flatten().sum();
        let grand_mean = grand_sum / total_ratings as f64;

        let subject_means: Vec<f64> = included
            .iter()
            .map(|scores| scores.iter().sum::<f64>() / scores.len() as f64)
            .collect();

        let ss_between: f64 = included
            .iter()
            .zip(&subject_means)
            .map(|(scores, mean)| scores.len() as f64 * (mean - grand_mean).powi(2))
            .sum();

        let ss_within: f64 = included
            .iter()
            .zip(&subject_means)
            .flat_map(|(scores, mean)| scores.iter().map(move |x| (x - mean).powi(2)))
            .sum();

        // Each subject has >= 2 ratings, so N - n >= n >= 2.
        let df_between = (num_subjects - 1) as f64;
        let df_within = (total_ratings - num_subjects) as f64;

        let mean_square_between = ss_between / df_between;
        let mean_square_within = ss_within / df_within;

        if mean_square_between + mean_square_within == 0.0 {
            return None;
        }

        let k = total_ratings as f64 / num_subjects as f64;
        let icc = (mean_square_between - mean_square_within)
            / (mean_square_between + (k - 1.0) * mean_square_within);

        if !icc.is_finite() {
            return None;
        }

        Some(IccResult {
            icc,
            mean_square_between,
            mean_square_within,
            num_subjects,
            num_raters: raters.len(),
            grand_mean,
            average_raters_per_subject: k,
        })
    }
}
