//! Static clinical vocabulary.
//!
//! The tables are process-wide constants. [`validate`] checks their
//! invariants and is run once when an engine or FFI core is built.

mod conditions;
mod medicines;

pub use conditions::*;
pub use medicines::*;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use thiserror::Error;

/// Vocabulary invariant violations.
#[derive(Error, Debug, PartialEq)]
pub enum VocabularyError {
    #[error("Condition {0:?} has no synonyms")]
    EmptySynonyms(String),

    #[error("Condition {0:?} does not list its own name as a synonym")]
    MissingSelfSynonym(String),

    #[error("Synonym {synonym:?} of {condition:?} is not a trimmed lower-case phrase")]
    MalformedSynonym { condition: String, synonym: String },

    #[error("Duplicate condition: {0}")]
    DuplicateCondition(String),

    #[error("Duplicate brand alias: {0}")]
    DuplicateBrand(String),

    #[error("Brand alias {0:?} must be a single lower-case word with a non-empty generic name")]
    MalformedBrand(String),
}

static BRAND_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| BRAND_TO_GENERIC.iter().copied().collect());

/// Look up the generic name for a brand token (exact, case-insensitive).
pub fn generic_for_brand(token: &str) -> Option<&'static str> {
    BRAND_INDEX.get(token.to_lowercase().as_str()).copied()
}

/// Is this exact name (case-sensitive) part of the canonical suggestion list?
pub fn is_common_medicine(name: &str) -> bool {
    COMMON_MEDICINES.contains(&name)
}

/// Check the static tables for the invariants the detector and normalizer rely on.
pub fn validate() -> Result<(), VocabularyError> {
    validate_tables(CONDITION_SYNONYMS, BRAND_TO_GENERIC)
}

pub(crate) fn validate_tables(
    conditions: &[SynonymEntry],
    brands: &[(&str, &str)],
) -> Result<(), VocabularyError> {
    let mut seen_conditions = HashSet::new();
    for entry in conditions {
        if !seen_conditions.insert(entry.condition) {
            return Err(VocabularyError::DuplicateCondition(entry.condition.into()));
        }
        if entry.synonyms.is_empty() {
            return Err(VocabularyError::EmptySynonyms(entry.condition.into()));
        }
        for synonym in entry.synonyms {
            if synonym.is_empty() || synonym.trim() != *synonym || synonym.to_lowercase() != *synonym
            {
                return Err(VocabularyError::MalformedSynonym {
                    condition: entry.condition.into(),
                    synonym: (*synonym).into(),
                });
            }
        }
        let own_name = entry.condition.to_lowercase();
        if !entry.synonyms.iter().any(|s| *s == own_name) {
            return Err(VocabularyError::MissingSelfSynonym(entry.condition.into()));
        }
    }

    let mut seen_brands = HashSet::new();
    for (brand, generic) in brands {
        let single_word = !brand.is_empty() && !brand.contains(char::is_whitespace);
        if !single_word || brand.to_lowercase() != *brand || generic.trim().is_empty() {
            return Err(VocabularyError::MalformedBrand((*brand).into()));
        }
        if !seen_brands.insert(*brand) {
            return Err(VocabularyError::DuplicateBrand((*brand).into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn test_generic_for_brand() {
        assert_eq!(generic_for_brand("crocin"), Some("Paracetamol"));
        assert_eq!(generic_for_brand("CROCIN"), Some("Paracetamol"));
        assert_eq!(
            generic_for_brand("augmentin"),
            Some("Amoxicillin + Clavulanic Acid")
        );
        // Exact token only, no substring matches
        assert_eq!(generic_for_brand("crocin500"), None);
        assert_eq!(generic_for_brand("croc"), None);
    }

    #[test]
    fn test_empty_synonym_list_rejected() {
        let conditions = [SynonymEntry {
            condition: "Fever",
            synonyms: &[],
        }];
        assert_eq!(
            validate_tables(&conditions, &[]),
            Err(VocabularyError::EmptySynonyms("Fever".into()))
        );
    }

    #[test]
    fn test_missing_self_synonym_rejected() {
        let conditions = [SynonymEntry {
            condition: "Fever",
            synonyms: &["pyrexia"],
        }];
        assert_eq!(
            validate_tables(&conditions, &[]),
            Err(VocabularyError::MissingSelfSynonym("Fever".into()))
        );
    }

    #[test]
    fn test_malformed_synonym_rejected() {
        let conditions = [SynonymEntry {
            condition: "Fever",
            synonyms: &["fever", "High Temperature"],
        }];
        assert!(matches!(
            validate_tables(&conditions, &[]),
            Err(VocabularyError::MalformedSynonym { .. })
        ));
    }

    #[test]
    fn test_duplicate_brand_rejected() {
        let brands = [("dolo", "Paracetamol"), ("dolo", "Paracetamol")];
        assert_eq!(
            validate_tables(&[], &brands),
            Err(VocabularyError::DuplicateBrand("dolo".into()))
        );
    }

    #[test]
    fn test_multi_word_brand_rejected() {
        let brands = [("potassium bromide", "Potassium Bromide")];
        assert!(matches!(
            validate_tables(&[], &brands),
            Err(VocabularyError::MalformedBrand(_))
        ));
    }
}
