//! Clinic-specific medicine names remembered for autocomplete.

use serde::{Deserialize, Serialize};

/// Shortest name worth remembering; shorter entries are usually half-typed.
pub const MIN_CUSTOM_MEDICINE_LEN: usize = 4;

/// A medicine name typed at this clinic that is not in the built-in list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomMedicine {
    pub name: String,
    /// How many times it has been prescribed
    pub usage_count: u32,
    pub created_at: String,
    pub updated_at: String,
}
