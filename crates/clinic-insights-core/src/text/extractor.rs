//! Splits a visit's medicines text into normalized medicine names.

use super::normalize_medicine;

/// Extract one normalized medicine per non-blank line, in input order.
///
/// Duplicates are kept; counting happens in [`super::group_medicines`].
pub fn extract_medicines(blob: Option<&str>) -> Vec<String> {
    let Some(blob) = blob else {
        return Vec::new();
    };

    blob.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_medicine)
        .filter(|name| !name.is_empty())
        .collect()
}
