//! Appointment database operations.

use rusqlite::params;

use super::{stored_timestamp, Database, DbResult};
use crate::models::Appointment;

impl Database {
    /// Book an appointment. `scheduled_at` is stored in UTC.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        let scheduled_at = stored_timestamp("scheduled_at", &appointment.scheduled_at)?;
        let created_at = stored_timestamp("created_at", &appointment.created_at)?;
        self.conn.execute(
            r#"
            INSERT INTO appointments (
                appointment_id, patient_id, patient_name, contact,
                scheduled_at, status, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                appointment.appointment_id,
                appointment.patient_id,
                appointment.patient_name,
                appointment.contact,
                scheduled_at,
                appointment.status,
                appointment.notes,
                created_at,
            ],
        )?;
        Ok(())
    }

    /// Appointments in schedule order.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT appointment_id, patient_id, patient_name, contact,
                   scheduled_at, status, notes, created_at
            FROM appointments
            ORDER BY scheduled_at
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Appointment {
                appointment_id: row.get(0)?,
                patient_id: row.get(1)?,
                patient_name: row.get(2)?,
                contact: row.get(3)?,
                scheduled_at: row.get(4)?,
                status: row.get(5)?,
                notes: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
