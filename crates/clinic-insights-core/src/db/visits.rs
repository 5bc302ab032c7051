//! Visit database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{stored_day, stored_timestamp, Database, DbResult};
use crate::analytics::VisitText;
use crate::models::Visit;

const VISIT_COLUMNS: &str = "visit_id, patient_id, visit_date, visit_type, chief_complaint, \
                             signs, diagnosis, treatment, medicines, notes, follow_up_date, created_at";

/// One exported row: a visit with its patient's details.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitLogRow {
    pub patient_id: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub visit: Visit,
}

fn visit_from_row(row: &Row<'_>) -> rusqlite::Result<Visit> {
    Ok(Visit {
        visit_id: row.get(0)?,
        patient_id: row.get(1)?,
        visit_date: row.get(2)?,
        visit_type: row.get(3)?,
        chief_complaint: row.get(4)?,
        signs: row.get(5)?,
        diagnosis: row.get(6)?,
        treatment: row.get(7)?,
        medicines: row.get(8)?,
        notes: row.get(9)?,
        follow_up_date: row.get(10)?,
        created_at: row.get(11)?,
    })
}

impl Database {
    /// Insert a new visit. The patient must exist.
    ///
    /// `visit_date` may carry any UTC offset; it is stored in UTC so visits
    /// order by instant.
    pub fn insert_visit(&self, visit: &Visit) -> DbResult<()> {
        let visit_date = stored_timestamp("visit_date", &visit.visit_date)?;
        let created_at = stored_timestamp("created_at", &visit.created_at)?;
        let follow_up_date = stored_day("follow_up_date", visit.follow_up_date.as_deref())?;
        self.conn.execute(
            r#"
            INSERT INTO visits (
                visit_id, patient_id, visit_date, visit_type, chief_complaint,
                signs, diagnosis, treatment, medicines, notes, follow_up_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                visit.visit_id,
                visit.patient_id,
                visit_date,
                visit.visit_type,
                visit.chief_complaint,
                visit.signs,
                visit.diagnosis,
                visit.treatment,
                visit.medicines,
                visit.notes,
                follow_up_date,
                created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a visit by ID.
    pub fn get_visit(&self, visit_id: &str) -> DbResult<Option<Visit>> {
        self.conn
            .query_row(
                &format!("SELECT {VISIT_COLUMNS} FROM visits WHERE visit_id = ?"),
                [visit_id],
                visit_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// A patient's visits, most recent first.
    pub fn list_visits_for_patient(&self, patient_id: &str) -> DbResult<Vec<Visit>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {VISIT_COLUMNS} FROM visits WHERE patient_id = ? ORDER BY visit_date DESC"
        ))?;
        let rows = stmt.query_map([patient_id], visit_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Text of the most recent visits that carry signs or medicines.
    pub fn recent_visit_text(&self, limit: usize) -> DbResult<Vec<VisitText>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT signs, medicines, visit_date
            FROM visits
            WHERE signs IS NOT NULL OR medicines IS NOT NULL
            ORDER BY visit_date DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            Ok(VisitText {
                signs: row.get(0)?,
                medicines: row.get(1)?,
                visit_date: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Every visit joined with its patient, newest patients first.
    pub fn visit_log(&self) -> DbResult<Vec<VisitLogRow>> {
        let columns = VISIT_COLUMNS
            .split(", ")
            .map(|c| format!("v.{}", c.trim()))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {columns}, p.name, p.age, p.gender, p.contact
            FROM visits v
            JOIN patients p ON p.patient_id = v.patient_id
            ORDER BY p.created_at DESC, v.visit_date DESC
            "#
        ))?;

        let rows = stmt.query_map([], |row| {
            let visit = visit_from_row(row)?;
            Ok(VisitLogRow {
                patient_id: visit.patient_id.clone(),
                name: row.get(12)?,
                age: row.get(13)?,
                gender: row.get(14)?,
                contact: row.get(15)?,
                visit,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
