//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix of clinic patient identifiers (`FC-001`).
pub const PATIENT_ID_PREFIX: &str = "FC";

/// Patient gender as recorded at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// A registered clinic patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Clinic identifier, e.g. "FC-042"
    pub patient_id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    /// Phone number
    pub contact: Option<String>,
    pub address: Option<String>,
    /// Blood group (e.g., "B+")
    pub blood_group: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(patient_id: String, name: String) -> Self {
        let now = super::timestamp_now();
        Self {
            patient_id,
            name,
            age: None,
            gender: None,
            contact: None,
            address: None,
            blood_group: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Format the clinic identifier for a sequence number: 7 → "FC-007".
pub fn format_patient_id(sequence: u32) -> String {
    format!("{}-{:03}", PATIENT_ID_PREFIX, sequence)
}

/// Parse the sequence number out of a clinic identifier.
pub fn patient_id_sequence(patient_id: &str) -> Option<u32> {
    let (prefix, number) = patient_id.split_once('-')?;
    if prefix != PATIENT_ID_PREFIX {
        return None;
    }
    number.parse().ok()
}
