//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{stored_timestamp, Database, DbError, DbResult};
use crate::models::{format_patient_id, patient_id_sequence, timestamp_now, Gender, Patient};

const PATIENT_COLUMNS: &str = "patient_id, name, age, gender, contact, address, blood_group, \
                               created_at, updated_at";

/// Shortest accepted patient name.
const MIN_NAME_LEN: usize = 2;

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    let gender: Option<String> = row.get(3)?;
    Ok(Patient {
        patient_id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: gender.and_then(|g| g.parse::<Gender>().ok()),
        contact: row.get(4)?,
        address: row.get(5)?,
        blood_group: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn validate_patient(patient: &Patient) -> DbResult<()> {
    if patient.name.trim().chars().count() < MIN_NAME_LEN {
        return Err(DbError::Constraint(format!(
            "Patient name must be at least {} characters",
            MIN_NAME_LEN
        )));
    }
    if patient.age == Some(0) {
        return Err(DbError::Constraint("Patient age must be positive".into()));
    }
    Ok(())
}

impl Database {
    /// Next clinic identifier: one past the highest existing sequence number.
    pub fn next_patient_id(&self) -> DbResult<String> {
        let mut stmt = self.conn.prepare("SELECT patient_id FROM patients")?;
        let ids = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut highest = 0;
        for id in ids {
            if let Some(sequence) = patient_id_sequence(&id?) {
                highest = highest.max(sequence);
            }
        }
        Ok(format_patient_id(highest + 1))
    }

    /// Insert a new patient. Timestamps are stored in UTC.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        validate_patient(patient)?;
        let created_at = stored_timestamp("created_at", &patient.created_at)?;
        let updated_at = stored_timestamp("updated_at", &patient.updated_at)?;
        self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, name, age, gender, contact, address, blood_group,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                patient.patient_id,
                patient.name.trim(),
                patient.age,
                patient.gender.map(|g| g.as_str()),
                patient.contact,
                patient.address,
                patient.blood_group,
                created_at,
                updated_at,
            ],
        )?;
        Ok(())
    }

    /// Assign the next clinic identifier to `patient` and insert it.
    pub fn register_patient(&self, mut patient: Patient) -> DbResult<Patient> {
        let tx = self.conn.unchecked_transaction()?;
        patient.patient_id = self.next_patient_id()?;
        patient.created_at = stored_timestamp("created_at", &patient.created_at)?;
        patient.updated_at = stored_timestamp("updated_at", &patient.updated_at)?;
        self.insert_patient(&patient)?;
        tx.commit()?;
        Ok(patient)
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        validate_patient(patient)?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                age = ?3,
                gender = ?4,
                contact = ?5,
                address = ?6,
                blood_group = ?7,
                updated_at = ?8
            WHERE patient_id = ?1
            "#,
            params![
                patient.patient_id,
                patient.name.trim(),
                patient.age,
                patient.gender.map(|g| g.as_str()),
                patient.contact,
                patient.address,
                patient.blood_group,
                timestamp_now(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by clinic ID.
    pub fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?"),
                [patient_id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search patients by name, contact or clinic ID (substring, case-insensitive).
    ///
    /// Most recently updated first. A blank query returns nothing.
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {PATIENT_COLUMNS}
            FROM patients
            WHERE name LIKE ?1 OR contact LIKE ?1 OR patient_id LIKE ?1
            ORDER BY updated_at DESC
            LIMIT ?2
            "#
        ))?;

        let rows = stmt.query_map(params![pattern, limit as i64], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all patients, newest first.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient and their visits.
    pub fn delete_patient(&self, patient_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE patient_id = ?", [patient_id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let db = setup_db();

        let first = db
            .register_patient(Patient::new(String::new(), "Rajesh Kumar Sharma".into()))
            .unwrap();
        let second = db
            .register_patient(Patient::new(String::new(), "Priya Patel".into()))
            .unwrap();

        assert_eq!(first.patient_id, "FC-001");
        assert_eq!(second.patient_id, "FC-002");
    }

    #[test]
    fn test_next_id_uses_numeric_maximum() {
        let db = setup_db();
        db.insert_patient(&Patient::new("FC-999".into(), "Old Patient".into()))
            .unwrap();
        db.insert_patient(&Patient::new("FC-1000".into(), "Newer Patient".into()))
            .unwrap();

        assert_eq!(db.next_patient_id().unwrap(), "FC-1001");
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut patient = Patient::new("FC-001".into(), "Priya Patel".into());
        patient.age = Some(28);
        patient.gender = Some(Gender::Female);
        patient.blood_group = Some("O+".into());
        db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient("FC-001").unwrap().unwrap();
        assert_eq!(retrieved.name, "Priya Patel");
        assert_eq!(retrieved.age, Some(28));
        assert_eq!(retrieved.gender, Some(Gender::Female));
        assert_eq!(retrieved.blood_group, Some("O+".into()));

        assert!(db.get_patient("FC-404").unwrap().is_none());
    }

    #[test]
    fn test_rejects_short_name_and_zero_age() {
        let db = setup_db();

        let patient = Patient::new("FC-001".into(), " A ".into());
        assert!(matches!(db.insert_patient(&patient), Err(DbError::Constraint(_))));

        let mut patient = Patient::new("FC-001".into(), "Amit".into());
        patient.age = Some(0);
        assert!(matches!(db.insert_patient(&patient), Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        let mut patient = Patient::new("FC-001".into(), "Priya Patel".into());
        db.insert_patient(&patient).unwrap();

        patient.contact = Some("+91-9123456789".into());
        assert!(db.update_patient(&patient).unwrap());

        let retrieved = db.get_patient("FC-001").unwrap().unwrap();
        assert_eq!(retrieved.contact, Some("+91-9123456789".into()));
    }

    #[test]
    fn test_search_patients() {
        let db = setup_db();

        let mut rajesh = Patient::new("FC-001".into(), "Rajesh Kumar".into());
        rajesh.contact = Some("+91-9876543210".into());
        db.insert_patient(&rajesh).unwrap();
        db.insert_patient(&Patient::new("FC-002".into(), "Raj Malhotra".into()))
            .unwrap();
        db.insert_patient(&Patient::new("FC-003".into(), "Priya Patel".into()))
            .unwrap();

        let results = db.search_patients("raj", 10).unwrap();
        assert_eq!(results.len(), 2);

        let results = db.search_patients("98765", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].patient_id, "FC-001");

        let results = db.search_patients("fc-003", 10).unwrap();
        assert_eq!(results[0].name, "Priya Patel");

        assert!(db.search_patients("  ", 10).unwrap().is_empty());
        assert_eq!(db.search_patients("a", 1).unwrap().len(), 1);
    }

    #[test]
    fn test_created_at_stored_in_utc() {
        let db = setup_db();

        let mut early = Patient::new("FC-001".into(), "Priya Patel".into());
        early.created_at = "2025-11-13T01:00:00+05:30".into();
        db.insert_patient(&early).unwrap();
        let mut late = Patient::new("FC-002".into(), "Rajesh Kumar".into());
        late.created_at = "2025-11-12T20:00:00Z".into();
        db.insert_patient(&late).unwrap();

        let listed = db.list_patients().unwrap();
        assert_eq!(listed[0].patient_id, "FC-002");
        assert_eq!(listed[1].created_at, "2025-11-12T19:30:00.000Z");

        let mut broken = Patient::new("FC-003".into(), "Amit Shah".into());
        broken.created_at = "13 Nov 2025".into();
        assert!(matches!(db.insert_patient(&broken), Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_delete_patient() {
        let db = setup_db();
        db.insert_patient(&Patient::new("FC-001".into(), "Priya Patel".into()))
            .unwrap();

        assert!(db.delete_patient("FC-001").unwrap());
        assert!(!db.delete_patient("FC-001").unwrap());
        assert_eq!(db.list_patients().unwrap().len(), 0);
    }
}
