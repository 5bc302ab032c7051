//! Medicine name normalizer.
//!
//! Handles:
//! - Case and whitespace cleanup
//! - Unit spacing (`500 MG` → `500 mg`)
//! - Brand → generic resolution on the leading token (`crocin` → `Paracetamol`)

use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::generic_for_brand;

/// Standalone unit tokens. Units glued to a number (`500mg`) are one token and left alone.
static UNIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\b(mg|ml|gm)\b\s*").expect("unit pattern is a valid regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Normalize a single medicine mention into its canonical display form.
///
/// Returns an empty string for blank input; callers filter those out
/// before counting.
pub fn normalize_medicine(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let collapsed = WHITESPACE.replace_all(lowered.trim(), " ");
    let dehyphenated = collapsed.replace(['-', '_'], " ");
    let unit_spaced = UNIT_PATTERN.replace_all(&dehyphenated, " $1 ");
    let cleaned = WHITESPACE.replace_all(unit_spaced.trim(), " ");

    let mut tokens = cleaned.split(' ').filter(|t| !t.is_empty());
    let Some(base) = tokens.next() else {
        return String::new();
    };
    let dosage: Vec<&str> = tokens.collect();

    let name = match generic_for_brand(base) {
        Some(generic) if dosage.is_empty() => generic.to_string(),
        Some(generic) => format!("{} {}", generic, dosage.join(" ")),
        None => cleaned.to_string(),
    };

    capitalize_first(&name)
}

/// Upper-case the first character, leave the rest untouched.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
