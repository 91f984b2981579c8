//! Analytics behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::analytics::MAX_HISTORY_LIMIT;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Reliability history entries returned when the caller gives no limit
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize {
    20
}
