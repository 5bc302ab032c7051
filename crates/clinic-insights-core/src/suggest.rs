//! Autocomplete suggestions for the visit form.
//!
//! Medicine suggestions search the clinic's own remembered names ahead of
//! the built-in list. Condition suggestions complete the last word typed
//! into a comma-separated list.

use std::collections::HashSet;

use crate::models::MIN_CUSTOM_MEDICINE_LEN;
use crate::vocabulary::{is_common_medicine, COMMON_CONDITIONS, COMMON_MEDICINES};

/// Shortest fragment worth completing in the conditions field.
const MIN_CONDITION_FRAGMENT: usize = 2;

/// Medicines whose name contains `query` (case-insensitive).
///
/// `custom` names come first, then the built-in list. Names that differ only
/// in case or surrounding whitespace appear once, as first seen.
pub fn suggest_medicines<S: AsRef<str>>(query: &str, custom: &[S], limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    custom
        .iter()
        .map(|name| name.as_ref())
        .chain(COMMON_MEDICINES.iter().copied())
        .filter(|name| seen.insert(name.trim().to_lowercase()))
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Built-in conditions matching the last word of `text`.
///
/// Words are separated by whitespace or commas, so a trailing separator
/// leaves nothing to complete.
pub fn suggest_conditions(text: &str, limit: usize) -> Vec<&'static str> {
    let fragment = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .next_back()
        .unwrap_or_default()
        .to_lowercase();
    if fragment.chars().count() < MIN_CONDITION_FRAGMENT {
        return Vec::new();
    }

    COMMON_CONDITIONS
        .iter()
        .copied()
        .filter(|condition| condition.to_lowercase().contains(&fragment))
        .take(limit)
        .collect()
}

/// Should a typed medicine be remembered as a custom entry?
pub fn should_remember_medicine(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= MIN_CUSTOM_MEDICINE_LEN && !is_common_medicine(name)
}
