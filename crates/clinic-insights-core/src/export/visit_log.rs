//! Flat visit log export, one row per visit.

use super::escape_csv;
use crate::db::{Database, DbResult, VisitLogRow};
use crate::models::local_day;

/// Written in place of any missing value.
const MISSING: &str = "N/A";

const HEADER: &str = "patient_id,name,age,gender,contact,visit_date,visit_type,\
                      chief_complaint,signs,diagnosis,treatment,medicines,follow_up_date\n";

/// Visit log export.
#[derive(Debug, Clone, Default)]
pub struct VisitLogExport {
    pub rows: Vec<VisitLogRow>,
    /// Visit dates are written as calendar days at this offset from UTC
    pub utc_offset_minutes: i32,
}

impl VisitLogExport {
    /// Every visit in the store.
    pub fn from_database(db: &Database) -> DbResult<Self> {
        Ok(Self {
            rows: db.visit_log()?,
            utc_offset_minutes: 0,
        })
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(HEADER);

        for row in &self.rows {
            let visit = &row.visit;
            let fields = [
                row.patient_id.clone(),
                row.name.clone(),
                row.age.map(|a| a.to_string()).unwrap_or_else(|| MISSING.into()),
                or_missing(&row.gender),
                or_missing(&row.contact),
                visit_day(&visit.visit_date, self.utc_offset_minutes),
                visit.visit_type.clone(),
                or_missing(&visit.chief_complaint),
                or_missing(&visit.signs),
                or_missing(&visit.diagnosis),
                or_missing(&visit.treatment),
                or_missing(&visit.medicines),
                or_missing(&visit.follow_up_date),
            ];
            let line: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
            csv.push_str(&line.join(","));
            csv.push('\n');
        }

        csv
    }
}

fn or_missing(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Local calendar date of an RFC 3339 visit timestamp; other formats pass through.
fn visit_day(visit_date: &str, utc_offset_minutes: i32) -> String {
    match local_day(visit_date, utc_offset_minutes) {
        Some(day) => day.to_string(),
        None if visit_date.trim().is_empty() => MISSING.to_string(),
        None => visit_date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, Visit};

    #[test]
    fn test_missing_values() {
        let db = Database::open_in_memory().unwrap();
        db.insert_patient(&Patient::new("FC-001".into(), "Meena Iyer".into()))
            .unwrap();
        let mut visit = Visit::new("FC-001".into());
        visit.visit_date = "2025-11-13T09:30:00+05:30".into();
        db.insert_visit(&visit).unwrap();

        let csv = VisitLogExport::from_database(&db).unwrap().to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("patient_id,name,age"));
        assert_eq!(
            lines[1],
            "FC-001,Meena Iyer,N/A,N/A,N/A,2025-11-13,Consultation,N/A,N/A,N/A,N/A,N/A,N/A"
        );
    }

    #[test]
    fn test_fields_are_escaped() {
        let db = Database::open_in_memory().unwrap();
        let mut patient = Patient::new("FC-002".into(), "Rao, Suresh".into());
        patient.age = Some(54);
        db.insert_patient(&patient).unwrap();

        let mut visit = Visit::new("FC-002".into());
        visit.visit_date = "2025-11-10T10:00:00Z".into();
        visit.signs = Some("fever, \"chills\"".into());
        visit.medicines = Some("Dolo 650mg\nPan 40".into());
        db.insert_visit(&visit).unwrap();

        let csv = VisitLogExport::from_database(&db).unwrap().to_csv();
        assert!(csv.contains("FC-002,\"Rao, Suresh\",54,"));
        assert!(csv.contains("\"fever, \"\"chills\"\"\""));
        assert!(csv.contains("\"Dolo 650mg\nPan 40\""));
    }

    #[test]
    fn test_visit_day_in_clinic_time() {
        let db = Database::open_in_memory().unwrap();
        db.insert_patient(&Patient::new("FC-001".into(), "Meena Iyer".into()))
            .unwrap();
        let mut visit = Visit::new("FC-001".into());
        visit.visit_date = "2025-11-13T02:00:00+05:30".into();
        db.insert_visit(&visit).unwrap();

        let export = VisitLogExport::from_database(&db).unwrap();
        assert!(export.to_csv().contains(",2025-11-12,Consultation,"));

        let csv = export.with_utc_offset_minutes(330).to_csv();
        assert!(csv.contains(",2025-11-13,Consultation,"));
    }

    #[test]
    fn test_empty_log() {
        assert_eq!(VisitLogExport::default().to_csv(), HEADER);
    }
}
