//! Collapses dosage variants of the same medicine into one count bucket.

use std::sync::LazyLock;

use regex::Regex;

use super::FrequencyTable;

/// Whitespace followed by a digit marks the start of the dosage.
static DOSAGE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d").expect("dosage pattern is a valid regex"));

/// Strip the dosage suffix from a normalized medicine name.
///
/// `"Paracetamol 500mg"` → `"Paracetamol"`, `"Vitamin D3 60000 IU"` → `"Vitamin D3"`.
pub fn grouping_key(medicine: &str) -> &str {
    let head = match DOSAGE_START.find(medicine) {
        Some(m) => &medicine[..m.start()],
        None => medicine,
    };
    head.trim()
}

/// Count normalized medicine mentions by grouping key.
pub fn group_medicines<S: AsRef<str>>(mentions: &[S]) -> FrequencyTable {
    mentions
        .iter()
        .map(|m| grouping_key(m.as_ref()))
        .filter(|key| !key.is_empty())
        .collect()
}
