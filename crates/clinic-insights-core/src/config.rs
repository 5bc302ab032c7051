//! Analytics configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on how many recent visits one report may scan.
pub const MAX_VISIT_WINDOW: usize = 1000;

/// Range of real-world UTC offsets, UTC-12:00 to UTC+14:00.
const UTC_OFFSET_RANGE: std::ops::RangeInclusive<i32> = -720..=840;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for report generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Number of most-recent visits whose text is analysed
    pub visit_window: usize,
    /// Length of the top-conditions and top-medicines lists
    pub top_n: usize,
    /// Weeks of registration history on the dashboard
    pub registration_weeks: usize,
    /// Clinic clock offset from UTC; "today" and month boundaries are local days
    pub utc_offset_minutes: i32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            visit_window: MAX_VISIT_WINDOW,
            top_n: 10,
            registration_weeks: 8,
            utc_offset_minutes: 0,
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_VISIT_WINDOW).contains(&self.visit_window) {
            return Err(ConfigError::Invalid {
                field: "visit_window",
                reason: format!("must be between 1 and {}", MAX_VISIT_WINDOW),
            });
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid {
                field: "top_n",
                reason: "must be at least 1".into(),
            });
        }
        if !(1..=52).contains(&self.registration_weeks) {
            return Err(ConfigError::Invalid {
                field: "registration_weeks",
                reason: "must be between 1 and 52".into(),
            });
        }
        if !UTC_OFFSET_RANGE.contains(&self.utc_offset_minutes) {
            return Err(ConfigError::Invalid {
                field: "utc_offset_minutes",
                reason: format!(
                    "must be between {} and {}",
                    UTC_OFFSET_RANGE.start(),
                    UTC_OFFSET_RANGE.end()
                ),
            });
        }
        Ok(())
    }
}
