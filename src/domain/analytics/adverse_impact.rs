//! Adverse Impact Analyzer - 4/5ths rule across demographic groups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::stats::round_to;

/// A group is flagged when its impact ratio falls below this value.
pub const FOUR_FIFTHS_THRESHOLD: f64 = 0.8;

/// Groups smaller than this carry no statistical weight and are dropped.
pub const MIN_GROUP_SAMPLE_SIZE: u32 = 5;

/// Decimal places for the reported impact ratio.
const IMPACT_RATIO_PRECISION: u32 = 3;

/// Pass/fail counts for one demographic group within a category.
///
/// The pass rate is always derived from the counts; a rate supplied by the
/// caller is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicGroup {
    pub group: String,
    pub category: String,
    pub pass_count: u32,
    pub total_count: u32,
}

impl DemographicGroup {
    /// Creates a new demographic group.
    pub fn new(
        group: impl Into<String>,
        category: impl Into<String>,
        pass_count: u32,
        total_count: u32,
    ) -> Self {
        Self {
            group: group.into(),
            category: category.into(),
            pass_count,
            total_count,
        }
    }

    /// Fraction of the group that passed. Zero for an empty group.
    pub fn pass_rate(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        f64::from(self.pass_count) / f64::from(self.total_count)
    }

    /// Returns true if the group is large enough to analyze.
    pub fn has_sufficient_sample(&self) -> bool {
        self.total_count >= MIN_GROUP_SAMPLE_SIZE
    }
}

/// Statistical standing of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    InsufficientData,
    Flagged,
    Ok,
}

impl Significance {
    /// Derives significance from sample size and the adverse-impact flag.
    pub fn for_group(total_count: u32, adverse_impact: bool) -> Self {
        if total_count < MIN_GROUP_SAMPLE_SIZE {
            Significance::InsufficientData
        } else if adverse_impact {
            Significance::Flagged
        } else {
            Significance::Ok
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Significance::InsufficientData => "insufficient_data",
            Significance::Flagged => "flagged",
            Significance::Ok => "ok",
        }
    }
}

/// A group's outcome relative to the reference group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupImpact {
    pub group: String,
    pub category: String,
    pub pass_count: u32,
    pub total_count: u32,
    pub pass_rate: f64,
    /// Rounded to three places.
    pub impact_ratio: f64,
    pub adverse_impact: bool,
    pub significance: Significance,
}

/// Adverse-impact analysis for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdverseImpactResult {
    pub reference_group: String,
    pub category: String,
    pub groups: Vec<GroupImpact>,
}

impl AdverseImpactResult {
    /// Groups flagged under the 4/5ths rule.
    pub fn flagged_groups(&self) -> impl Iterator<Item = &GroupImpact> {
        self.groups.iter().filter(|g| g.adverse_impact)
    }

    /// Returns true if any group is flagged.
    pub fn has_adverse_impact(&self) -> bool {
        self.groups.iter().any(|g| g.adverse_impact)
    }
}

/// 4/5ths-rule analysis.
pub struct AdverseImpactAnalyzer;

impl AdverseImpactAnalyzer {
    /// Runs the 4/5ths rule over groups sharing one category.
    ///
    /// # Algorithm
    /// - keep groups with at least `MIN_GROUP_SAMPLE_SIZE` members
    /// - reference = highest pass rate; ties go to the earliest group in
    ///   input order
    /// - impact ratio = pass rate / reference pass rate, 1 when the
    ///   reference rate is 0, rounded to three places
    /// - adverse impact when the *rounded* ratio is below 0.8 and the
    ///   group is not the reference
    ///
    /// # Edge Cases
    /// - Fewer than two groups, or fewer than two valid groups: `None`
    /// - Groups below the sample floor are omitted from the output
    pub fn analyze(groups: &[DemographicGroup]) -> Option<AdverseImpactResult> {
        if groups.len() < 2 {
            return None;
        }

        let valid: Vec<&DemographicGroup> =
            groups.iter().filter(|g| g.has_sufficient_sample()).collect();
        if valid.len() < 2 {
            return None;
        }

        let mut reference_index = 0;
        for (i, group) in valid.iter().enumerate().skip(1) {
            if group.pass_rate() > valid[reference_index].pass_rate() {
                reference_index = i;
            }
        }
        let reference = valid[reference_index];
        let reference_rate = reference.pass_rate();

        let impacts = valid
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let pass_rate = group.pass_rate();
                let raw_ratio = if reference_rate == 0.0 {
                    1.0
                } else {
                    pass_rate / reference_rate
                };
                let impact_ratio = round_to(raw_ratio, IMPACT_RATIO_PRECISION);
                let adverse_impact = i != reference_index && impact_ratio < FOUR_FIFTHS_THRESHOLD;

                GroupImpact {
                    group: group.group.clone(),
                    category: group.category.clone(),
                    pass_count: group.pass_count,
                    total_count: group.total_count,
                    pass_rate,
                    impact_ratio,
                    adverse_impact,
                    significance: Significance::for_group(group.total_count, adverse_impact),
                }
            })
            .collect();

        Some(AdverseImpactResult {
            reference_group: reference.group.clone(),
            category: reference.category.clone(),
            groups: impacts,
        })
    }

    /// Partitions mixed groups by category and analyzes each one.
    ///
    /// Categories come back sorted by name; categories without enough data
    /// are skipped.
    pub fn analyze_by_category(groups: &[DemographicGroup]) -> Vec<AdverseImpactResult> {
        let mut by_category: BTreeMap<&str, Vec<DemographicGroup>> = BTreeMap::new();
        for group in groups {
            by_category
                .entry(group.category.as_str())
                .or_default()
                .push(group.clone());
        }

        by_category
            .values()
            .filter_map(|members| Self::analyze(members))
            .collect()
    }
}
