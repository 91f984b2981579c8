//! Score value object for evaluator ratings (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A single evaluator score.
///
/// Fresh input is validated against the closed range `[MIN, MAX]` with
/// [`Score::try_new`]. Rows that were already persisted are taken as-is with
/// [`Score::from_raw`]; out-of-range values then flow through the analytics
/// unclamped so upstream bugs stay visible in the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    /// Lowest valid score.
    pub const MIN: i32 = 1;
    /// Highest valid score.
    pub const MAX: i32 = 5;

    /// Creates a score, returning error if outside `[MIN, MAX]`.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "score",
                Self::MIN,
                Self::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Wraps a stored value without range validation.
    pub fn from_raw(value: i32) -> Self {
        Self(value)
    }

    /// Returns the integer value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns the value as a float for statistics.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// Returns true if the value lies in the valid range.
    pub fn is_in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
