//! Condition detection over free-text signs and symptoms.
//!
//! Each synonym is matched on word boundaries. A synonym that also appears
//! directly after a negation word (`no`, `not`, `without`, `absent`) anywhere
//! in the text does not count; later synonyms of the same condition are
//! still tried. The negation check is a local pattern, not scope analysis.

use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::{SynonymEntry, CONDITION_SYNONYMS};

/// Compiled positive and negated patterns for one synonym.
struct SynonymPattern {
    positive: Regex,
    negated: Regex,
}

impl SynonymPattern {
    fn compile(synonym: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(synonym);
        Ok(Self {
            positive: Regex::new(&format!(r"(?i)\b{escaped}\b"))?,
            negated: Regex::new(&format!(r"(?i)\b(?:no|not|without|absent)\s+{escaped}\b"))?,
        })
    }

    fn affirmed_in(&self, text: &str) -> bool {
        self.positive.is_match(text) && !self.negated.is_match(text)
    }
}

/// A condition with its compiled synonym patterns, in registration order.
struct ConditionPatterns {
    condition: &'static str,
    synonyms: Vec<SynonymPattern>,
}

/// Detector over a synonym table.
pub struct ConditionDetector {
    conditions: Vec<ConditionPatterns>,
}

static DEFAULT_DETECTOR: LazyLock<ConditionDetector> = LazyLock::new(|| {
    ConditionDetector::from_table(CONDITION_SYNONYMS)
        .expect("built-in synonyms are escaped literals and always compile")
});

impl ConditionDetector {
    /// Compile a detector for the given table.
    pub fn from_table(table: &[SynonymEntry]) -> Result<Self, regex::Error> {
        let conditions = table
            .iter()
            .map(|entry| -> Result<ConditionPatterns, regex::Error> {
                let synonyms = entry
                    .synonyms
                    .iter()
                    .map(|s| SynonymPattern::compile(s))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ConditionPatterns {
                    condition: entry.condition,
                    synonyms,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { conditions })
    }

    /// The process-wide detector over the built-in vocabulary.
    pub fn shared() -> &'static ConditionDetector {
        &DEFAULT_DETECTOR
    }

    /// Detect canonical conditions, each at most once, in table order.
    pub fn detect(&self, text: Option<&str>) -> Vec<&'static str> {
        let Some(text) = text else {
            return Vec::new();
        };
        let lower = text.to_lowercase();
        if lower.trim().is_empty() {
            return Vec::new();
        }

        self.conditions
            .iter()
            .filter(|c| c.synonyms.iter().any(|s| s.affirmed_in(&lower)))
            .map(|c| c.condition)
            .collect()
    }
}

/// Detect conditions with the built-in vocabulary.
pub fn detect_conditions(text: Option<&str>) -> Vec<&'static str> {
    ConditionDetector::shared().detect(text)
}
