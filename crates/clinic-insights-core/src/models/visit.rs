//! Visit and appointment models.

use serde::{Deserialize, Serialize};

/// One consultation with a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visit {
    /// Unique visit ID
    pub visit_id: String,
    /// Owning patient's clinic ID
    pub patient_id: String,
    /// Visit timestamp (RFC 3339)
    pub visit_date: String,
    /// Consultation, Follow-up, Emergency, ...
    pub visit_type: String,
    pub chief_complaint: Option<String>,
    /// Free-text signs and symptoms
    pub signs: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    /// Free-text medicines, one per line
    pub medicines: Option<String>,
    pub notes: Option<String>,
    /// Follow-up date (YYYY-MM-DD)
    pub follow_up_date: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl Visit {
    /// Create a consultation visit dated now.
    pub fn new(patient_id: String) -> Self {
        let now = super::timestamp_now();
        Self {
            visit_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            visit_date: now.clone(),
            visit_type: "Consultation".into(),
            chief_complaint: None,
            signs: None,
            diagnosis: None,
            treatment: None,
            medicines: None,
            notes: None,
            follow_up_date: None,
            created_at: now,
        }
    }
}

/// A booked appointment. `patient_id` is `None` for someone not yet registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub contact: Option<String>,
    /// Scheduled time (RFC 3339)
    pub scheduled_at: String,
    /// scheduled, completed, cancelled
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl Appointment {
    pub fn new(patient_name: String, scheduled_at: String) -> Self {
        Self {
            appointment_id: uuid::Uuid::new_v4().to_string(),
            patient_id: None,
            patient_name,
            contact: None,
            scheduled_at,
            status: "scheduled".into(),
            notes: None,
            created_at: super::timestamp_now(),
        }
    }

    pub fn is_new_patient(&self) -> bool {
        self.patient_id.is_none()
    }
}
