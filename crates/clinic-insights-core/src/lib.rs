//! Clinic Insights Core Library
//!
//! Local-first patient records for a small clinic, plus the analytics that
//! turn free-text visit notes into dashboard figures.
//!
//! # Architecture
//!
//! ```text
//! visits.signs ──────► detect_conditions ─────────────────► condition counts ──┐
//! visits.medicines ──► extract_medicines ─► normalize ─► group ─► medicine counts ─┤
//! patients / visits / appointments ─► ClinicStatistics (one batch) ────────────┤
//!                                                                              ▼
//!                                                                      AnalyticsReport
//!                                                                              │
//!                                                                      JSON / CSV export
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`]: Condition synonyms, brand aliases, suggestion lists
//! - [`text`]: Medicine normalization, extraction, grouping; condition detection
//! - [`analytics`]: Report generation over a [`ClinicDataSource`]
//! - [`db`]: SQLite storage, implements [`ClinicDataSource`]
//! - [`models`]: Domain types (Patient, Visit, Appointment, CustomMedicine)
//! - [`suggest`]: Autocomplete for the visit form
//! - [`export`]: Report and visit log export
//! - [`config`]: Analytics configuration

pub mod analytics;
pub mod config;
pub mod db;
pub mod export;
pub mod models;
pub mod suggest;
pub mod text;
pub mod vocabulary;

// Re-export commonly used types
pub use analytics::{AnalyticsEngine, AnalyticsReport, ClinicDataSource, ClinicStatistics};
pub use config::AnalyticsConfig;
pub use db::Database;
pub use models::{Appointment, CustomMedicine, Gender, Patient, Visit};
pub use text::{detect_conditions, extract_medicines, group_medicines, normalize_medicine};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicInsightsError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for ClinicInsightsError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::Constraint(reason) => ClinicInsightsError::InvalidInput(reason),
            other => ClinicInsightsError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClinicInsightsError {
    fn from(e: serde_json::Error) -> Self {
        ClinicInsightsError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for ClinicInsightsError {
    fn from(e: config::ConfigError) -> Self {
        ClinicInsightsError::ConfigError(e.to_string())
    }
}

impl From<analytics::AnalyticsError> for ClinicInsightsError {
    fn from(e: analytics::AnalyticsError) -> Self {
        ClinicInsightsError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicInsightsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicInsightsError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
///
/// `config_json` overrides analytics settings; missing keys keep their defaults.
#[uniffi::export]
pub fn open_database(
    path: String,
    config_json: Option<String>,
) -> Result<Arc<ClinicInsightsCore>, ClinicInsightsError> {
    let db = Database::open(&path)?;
    ClinicInsightsCore::build(db, config_json.as_deref())
}

/// Open a store that lives only as long as the returned handle.
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<ClinicInsightsCore>, ClinicInsightsError> {
    let db = Database::open_in_memory()?;
    ClinicInsightsCore::build(db, None)
}

// =========================================================================
// Text Functions (exported to FFI)
// =========================================================================

/// Canonical form of one medicine line.
#[uniffi::export]
pub fn normalize_medicine_name(raw: String) -> String {
    normalize_medicine(&raw)
}

/// Normalized medicines from a newline-separated prescription.
#[uniffi::export]
pub fn extract_medicine_names(text: Option<String>) -> Vec<String> {
    extract_medicines(text.as_deref())
}

/// Canonical conditions mentioned (and not negated) in a signs note.
#[uniffi::export]
pub fn detect_condition_names(text: Option<String>) -> Vec<String> {
    detect_conditions(text.as_deref())
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Medicine counts with dosage variants collapsed, in first-seen order.
#[uniffi::export]
pub fn group_medicine_names(names: Vec<String>) -> Vec<FfiRankedEntry> {
    group_medicines(&names)
        .iter()
        .map(|(name, count)| FfiRankedEntry {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Should a typed medicine be saved as a custom entry?
#[uniffi::export]
pub fn should_remember_medicine(name: String) -> bool {
    suggest::should_remember_medicine(&name)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicInsightsCore {
    db: Arc<Mutex<Database>>,
    engine: AnalyticsEngine,
}

impl ClinicInsightsCore {
    fn build(
        db: Database,
        config_json: Option<&str>,
    ) -> Result<Arc<Self>, ClinicInsightsError> {
        let config = match config_json {
            Some(json) => AnalyticsConfig::from_json(json)?,
            None => AnalyticsConfig::default(),
        };
        Ok(Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            engine: AnalyticsEngine::new(config)?,
        }))
    }

    fn report_for(&self, today_iso: &str) -> Result<AnalyticsReport, ClinicInsightsError> {
        let today = parse_day(today_iso)?;
        let db = self.db.lock()?;
        Ok(self.engine.generate_report(&*db, today)?)
    }
}

#[uniffi::export]
impl ClinicInsightsCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient under the next clinic ID.
    pub fn register_patient(&self, input: FfiNewPatient) -> Result<FfiPatient, ClinicInsightsError> {
        let db = self.db.lock()?;
        let mut patient = Patient::new(String::new(), input.name);
        patient.age = input.age;
        patient.gender = parse_gender(input.gender)?;
        patient.contact = input.contact;
        patient.address = input.address;
        patient.blood_group = input.blood_group;
        let patient = db.register_patient(patient)?;
        Ok(patient.into())
    }

    /// Update a patient's details.
    pub fn update_patient(&self, patient: FfiPatient) -> Result<(), ClinicInsightsError> {
        let db = self.db.lock()?;
        let existing = db
            .get_patient(&patient.patient_id)?
            .ok_or_else(|| ClinicInsightsError::NotFound(patient.patient_id.clone()))?;
        let updated = Patient {
            name: patient.name,
            age: patient.age,
            gender: parse_gender(patient.gender)?,
            contact: patient.contact,
            address: patient.address,
            blood_group: patient.blood_group,
            ..existing
        };
        db.update_patient(&updated)?;
        Ok(())
    }

    /// Get a patient by clinic ID.
    pub fn get_patient(&self, patient_id: String) -> Result<Option<FfiPatient>, ClinicInsightsError> {
        let db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        Ok(patient.map(|p| p.into()))
    }

    /// Search patients by name, contact or clinic ID.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, ClinicInsightsError> {
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Delete a patient and their visits.
    pub fn delete_patient(&self, patient_id: String) -> Result<bool, ClinicInsightsError> {
        let db = self.db.lock()?;
        Ok(db.delete_patient(&patient_id)?)
    }

    // =========================================================================
    // Visit Operations
    // =========================================================================

    /// Record a visit for an existing patient.
    pub fn record_visit(&self, input: FfiNewVisit) -> Result<FfiVisit, ClinicInsightsError> {
        let db = self.db.lock()?;
        if db.get_patient(&input.patient_id)?.is_none() {
            return Err(ClinicInsightsError::NotFound(input.patient_id));
        }

        let mut visit = Visit::new(input.patient_id);
        if let Some(visit_date) = input.visit_date {
            visit.visit_date = parse_timestamp(&visit_date)?;
        }
        if let Some(visit_type) = input.visit_type {
            visit.visit_type = visit_type;
        }
        visit.chief_complaint = input.chief_complaint;
        visit.signs = input.signs;
        visit.diagnosis = input.diagnosis;
        visit.treatment = input.treatment;
        visit.medicines = input.medicines;
        visit.notes = input.notes;
        visit.follow_up_date = match input.follow_up_date {
            Some(day) => Some(parse_day(&day)?.to_string()),
            None => None,
        };
        db.insert_visit(&visit)?;
        Ok(visit.into())
    }

    /// A patient's visits, most recent first.
    pub fn list_visits(&self, patient_id: String) -> Result<Vec<FfiVisit>, ClinicInsightsError> {
        let db = self.db.lock()?;
        let visits = db.list_visits_for_patient(&patient_id)?;
        Ok(visits.into_iter().map(|v| v.into()).collect())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Book an appointment. Leave `patient_id` empty for someone not yet registered.
    pub fn book_appointment(
        &self,
        input: FfiNewAppointment,
    ) -> Result<FfiAppointment, ClinicInsightsError> {
        let db = self.db.lock()?;
        let scheduled_at = parse_timestamp(&input.scheduled_at)?;
        let mut appointment = Appointment::new(input.patient_name, scheduled_at);
        appointment.patient_id = input.patient_id;
        appointment.contact = input.contact;
        appointment.notes = input.notes;
        db.insert_appointment(&appointment)?;
        Ok(appointment.into())
    }

    /// All appointments in schedule order.
    pub fn list_appointments(&self) -> Result<Vec<FfiAppointment>, ClinicInsightsError> {
        let db = self.db.lock()?;
        let appointments = db.list_appointments()?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    // =========================================================================
    // Medicine Suggestions
    // =========================================================================

    /// Remember a clinic-specific medicine name.
    pub fn record_custom_medicine(
        &self,
        name: String,
    ) -> Result<FfiCustomMedicine, ClinicInsightsError> {
        let db = self.db.lock()?;
        Ok(db.record_custom_medicine(&name)?.into())
    }

    /// Remembered medicine names, most used first.
    pub fn list_custom_medicines(&self) -> Result<Vec<FfiCustomMedicine>, ClinicInsightsError> {
        let db = self.db.lock()?;
        let medicines = db.list_custom_medicines()?;
        Ok(medicines.into_iter().map(|m| m.into()).collect())
    }

    /// Medicine suggestions for the line being typed, custom names first.
    pub fn suggest_medicines(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<String>, ClinicInsightsError> {
        let db = self.db.lock()?;
        let custom: Vec<String> = db
            .list_custom_medicines()?
            .into_iter()
            .map(|m| m.name)
            .collect();
        Ok(suggest::suggest_medicines(&query, &custom, limit as usize))
    }

    /// Condition suggestions for the last word typed.
    pub fn suggest_conditions(&self, text: String, limit: u32) -> Vec<String> {
        suggest::suggest_conditions(&text, limit as usize)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // =========================================================================
    // Analytics and Export
    // =========================================================================

    /// Build the analytics dashboard as of `today_iso` (YYYY-MM-DD).
    pub fn analytics_report(
        &self,
        today_iso: String,
    ) -> Result<FfiAnalyticsReport, ClinicInsightsError> {
        Ok(self.report_for(&today_iso)?.into())
    }

    /// Export the analytics report as JSON.
    pub fn export_report_json(&self, today_iso: String) -> Result<String, ClinicInsightsError> {
        Ok(self.report_for(&today_iso)?.to_json()?)
    }

    /// Export the analytics report as CSV.
    pub fn export_report_csv(&self, today_iso: String) -> Result<String, ClinicInsightsError> {
        Ok(self.report_for(&today_iso)?.to_csv())
    }

    /// Export every visit with its patient as CSV.
    pub fn export_visit_log_csv(&self) -> Result<String, ClinicInsightsError> {
        let db = self.db.lock()?;
        let log = export::VisitLogExport::from_database(&db)?
            .with_utc_offset_minutes(self.engine.config().utc_offset_minutes);
        Ok(log.to_csv())
    }
}

fn parse_day(iso: &str) -> Result<NaiveDate, ClinicInsightsError> {
    iso.trim()
        .parse::<NaiveDate>()
        .map_err(|e| ClinicInsightsError::InvalidInput(format!("Invalid date {:?}: {}", iso, e)))
}

/// RFC 3339 with any offset, converted to the stored UTC form.
fn parse_timestamp(raw: &str) -> Result<String, ClinicInsightsError> {
    models::to_utc_timestamp(raw).map_err(|e| {
        ClinicInsightsError::InvalidInput(format!("Invalid timestamp {:?}: {}", raw, e))
    })
}

fn parse_gender(gender: Option<String>) -> Result<Option<Gender>, ClinicInsightsError> {
    gender
        .filter(|g| !g.trim().is_empty())
        .map(|g| g.parse::<Gender>().map_err(ClinicInsightsError::InvalidInput))
        .transpose()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub created_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.map(|g| g.to_string()),
            contact: patient.contact,
            address: patient.address,
            blood_group: patient.blood_group,
            created_at: patient.created_at,
        }
    }
}

/// FFI-safe registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
}

/// FFI-safe visit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisit {
    pub visit_id: String,
    pub patient_id: String,
    pub visit_date: String,
    pub visit_type: String,
    pub chief_complaint: Option<String>,
    pub signs: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medicines: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
}

impl From<Visit> for FfiVisit {
    fn from(visit: Visit) -> Self {
        Self {
            visit_id: visit.visit_id,
            patient_id: visit.patient_id,
            visit_date: visit.visit_date,
            visit_type: visit.visit_type,
            chief_complaint: visit.chief_complaint,
            signs: visit.signs,
            diagnosis: visit.diagnosis,
            treatment: visit.treatment,
            medicines: visit.medicines,
            notes: visit.notes,
            follow_up_date: visit.follow_up_date,
        }
    }
}

/// FFI-safe visit form. Unset date and type default to now and "Consultation".
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewVisit {
    pub patient_id: String,
    pub visit_date: Option<String>,
    pub visit_type: Option<String>,
    pub chief_complaint: Option<String>,
    pub signs: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medicines: Option<String>,
    pub notes: Option<String>,
    /// YYYY-MM-DD
    pub follow_up_date: Option<String>,
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub appointment_id: String,
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub contact: Option<String>,
    pub scheduled_at: String,
    pub status: String,
    pub notes: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            appointment_id: appointment.appointment_id,
            patient_id: appointment.patient_id,
            patient_name: appointment.patient_name,
            contact: appointment.contact,
            scheduled_at: appointment.scheduled_at,
            status: appointment.status,
            notes: appointment.notes,
        }
    }
}

/// FFI-safe booking form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAppointment {
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub contact: Option<String>,
    pub scheduled_at: String,
    pub notes: Option<String>,
}

/// FFI-safe custom medicine.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCustomMedicine {
    pub name: String,
    pub usage_count: u32,
}

impl From<CustomMedicine> for FfiCustomMedicine {
    fn from(medicine: CustomMedicine) -> Self {
        Self {
            name: medicine.name,
            usage_count: medicine.usage_count,
        }
    }
}

/// FFI-safe name/count pair.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRankedEntry {
    pub name: String,
    pub count: u64,
}

impl From<text::RankedEntry> for FfiRankedEntry {
    fn from(entry: text::RankedEntry) -> Self {
        Self {
            name: entry.name,
            count: entry.count,
        }
    }
}

/// FFI-safe weekly registration count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWeeklyRegistration {
    pub label: String,
    pub week_start: String,
    pub week_end: String,
    pub count: u64,
}

/// FFI-safe analytics report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalyticsReport {
    pub generated_on: String,
    pub total_patients: u64,
    pub patients_this_month: u64,
    pub patients_last_month: u64,
    pub patients_this_week: u64,
    pub consultations_today: u64,
    pub upcoming_follow_ups: u64,
    pub follow_ups_this_week: u64,
    pub overdue_follow_ups: u64,
    pub growth_rate: f64,
    pub completion_rate: f64,
    pub avg_patients_per_day: f64,
    pub top_conditions: Vec<FfiRankedEntry>,
    pub top_medicines: Vec<FfiRankedEntry>,
    pub male_patients: u64,
    pub female_patients: u64,
    pub other_patients: u64,
    /// Age band label ("0-18", ..., "65+") with its count
    pub age_groups: Vec<FfiRankedEntry>,
    pub appointments_total: u64,
    pub appointments_existing_patients: u64,
    pub appointments_new_patients: u64,
    pub weekly_registrations: Vec<FfiWeeklyRegistration>,
    pub visits_analyzed: u64,
}

impl From<AnalyticsReport> for FfiAnalyticsReport {
    fn from(report: AnalyticsReport) -> Self {
        Self {
            generated_on: report.generated_on.to_string(),
            total_patients: report.total_patients,
            patients_this_month: report.patients_this_month,
            patients_last_month: report.patients_last_month,
            patients_this_week: report.patients_this_week,
            consultations_today: report.consultations_today,
            upcoming_follow_ups: report.upcoming_follow_ups,
            follow_ups_this_week: report.follow_ups_this_week,
            overdue_follow_ups: report.overdue_follow_ups,
            growth_rate: report.growth_rate,
            completion_rate: report.completion_rate,
            avg_patients_per_day: report.avg_patients_per_day,
            top_conditions: report.top_conditions.into_iter().map(|e| e.into()).collect(),
            top_medicines: report.top_medicines.into_iter().map(|e| e.into()).collect(),
            male_patients: report.gender.male,
            female_patients: report.gender.female,
            other_patients: report.gender.other,
            age_groups: report
                .age_groups
                .labeled()
                .iter()
                .map(|(label, count)| FfiRankedEntry {
                    name: label.to_string(),
                    count: *count,
                })
                .collect(),
            appointments_total: report.appointments.total,
            appointments_existing_patients: report.appointments.existing_patients,
            appointments_new_patients: report.appointments.new_patients,
            weekly_registrations: report
                .weekly_registrations
                .into_iter()
                .map(|w| FfiWeeklyRegistration {
                    label: w.label,
                    week_start: w.week_start.to_string(),
                    week_end: w.week_end.to_string(),
                    count: w.count,
                })
                .collect(),
            visits_analyzed: report.visits_analyzed as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_patient(name: &str) -> FfiNewPatient {
        FfiNewPatient {
            name: name.into(),
            age: Some(34),
            gender: Some("female".into()),
            contact: Some("9876543210".into()),
            address: None,
            blood_group: None,
        }
    }

    fn new_visit(patient_id: &str) -> FfiNewVisit {
        FfiNewVisit {
            patient_id: patient_id.into(),
            visit_date: None,
            visit_type: None,
            chief_complaint: None,
            signs: None,
            diagnosis: None,
            treatment: None,
            medicines: None,
            notes: None,
            follow_up_date: None,
        }
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(normalize_medicine_name("crocin 500mg".into()), "Paracetamol 500mg");
        assert_eq!(
            extract_medicine_names(Some("Dolo 650mg\n\nPan 40".into())),
            vec!["Paracetamol 650mg", "Pan 40"]
        );
        assert_eq!(
            detect_condition_names(Some("High BP, no fever".into())),
            vec!["Hypertension"]
        );
        assert_eq!(
            group_medicine_names(vec![
                "Paracetamol 500mg".into(),
                "Paracetamol 650mg".into(),
                "Amoxicillin".into(),
            ]),
            vec![
                FfiRankedEntry {
                    name: "Paracetamol".into(),
                    count: 2
                },
                FfiRankedEntry {
                    name: "Amoxicillin".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_patient_round_trip() {
        let core = open_database_in_memory().unwrap();
        let patient = core.register_patient(new_patient("Lakshmi Nair")).unwrap();
        assert_eq!(patient.patient_id, "FC-001");
        assert_eq!(patient.gender.as_deref(), Some("Female"));

        let mut edited = patient.clone();
        edited.age = Some(35);
        core.update_patient(edited).unwrap();

        let fetched = core.get_patient("FC-001".into()).unwrap().unwrap();
        assert_eq!(fetched.age, Some(35));
        assert_eq!(core.search_patients("laks".into(), 10).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_gender_rejected() {
        let core = open_database_in_memory().unwrap();
        let mut input = new_patient("Lakshmi Nair");
        input.gender = Some("unknown".into());
        assert!(matches!(
            core.register_patient(input),
            Err(ClinicInsightsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_visit_for_unknown_patient() {
        let core = open_database_in_memory().unwrap();
        assert!(matches!(
            core.record_visit(new_visit("FC-404")),
            Err(ClinicInsightsError::NotFound(_))
        ));
    }

    #[test]
    fn test_visit_dates_stored_in_utc() {
        let core = open_database_in_memory().unwrap();
        let patient = core.register_patient(new_patient("Lakshmi Nair")).unwrap();

        let mut input = new_visit(&patient.patient_id);
        input.visit_date = Some("2025-11-12T23:00:00+05:30".into());
        let recorded = core.record_visit(input).unwrap();
        assert_eq!(recorded.visit_date, "2025-11-12T17:30:00.000Z");

        let listed = core.list_visits(patient.patient_id.clone()).unwrap();
        assert_eq!(listed[0].visit_date, recorded.visit_date);

        let mut input = new_visit(&patient.patient_id);
        input.visit_date = Some("12-11-2025".into());
        assert!(matches!(
            core.record_visit(input),
            Err(ClinicInsightsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_visit_log_uses_clinic_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.db").to_string_lossy().into_owned();
        let core = open_database(path, Some(r#"{"utc_offset_minutes": 330}"#.into())).unwrap();
        let patient = core.register_patient(new_patient("Lakshmi Nair")).unwrap();

        let mut input = new_visit(&patient.patient_id);
        input.visit_date = Some("2025-11-12T21:30:00Z".into());
        core.record_visit(input).unwrap();

        let log = core.export_visit_log_csv().unwrap();
        assert!(log.contains(",2025-11-13,Consultation,"));
    }

    #[test]
    fn test_custom_medicine_suggestions() {
        let core = open_database_in_memory().unwrap();
        core.record_custom_medicine("Zincovit Plus".into()).unwrap();
        assert!(matches!(
            core.record_custom_medicine("Zin".into()),
            Err(ClinicInsightsError::InvalidInput(_))
        ));

        let suggestions = core.suggest_medicines("zinco".into(), 5).unwrap();
        assert_eq!(suggestions[0], "Zincovit Plus");
    }

    #[test]
    fn test_analytics_report() {
        let core = open_database_in_memory().unwrap();
        let patient = core.register_patient(new_patient("Lakshmi Nair")).unwrap();

        let mut visit = new_visit(&patient.patient_id);
        visit.signs = Some("Fever and headache".into());
        visit.medicines = Some("Crocin 500mg\nPan 40".into());
        core.record_visit(visit).unwrap();

        let today = chrono::Utc::now().date_naive().to_string();
        let report = core.analytics_report(today.clone()).unwrap();
        assert_eq!(report.generated_on, today);
        assert_eq!(report.total_patients, 1);
        assert_eq!(report.visits_analyzed, 1);
        assert_eq!(report.top_conditions.len(), 2);
        assert_eq!(report.age_groups[1].count, 1);

        assert!(core.export_report_json(today.clone()).unwrap().contains("Paracetamol"));
        assert!(core.export_report_csv(today).unwrap().starts_with("section,name,count"));
        assert!(core.export_visit_log_csv().unwrap().contains("Lakshmi Nair"));
    }

    #[test]
    fn test_bad_report_date() {
        let core = open_database_in_memory().unwrap();
        assert!(matches!(
            core.analytics_report("13/11/2025".into()),
            Err(ClinicInsightsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_config_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.db").to_string_lossy().into_owned();
        assert!(open_database(path.clone(), Some(r#"{"top_n": 3}"#.into())).is_ok());
        assert!(matches!(
            open_database(path, Some(r#"{"top_n": 0}"#.into())),
            Err(ClinicInsightsError::ConfigError(_))
        ));
    }
}
