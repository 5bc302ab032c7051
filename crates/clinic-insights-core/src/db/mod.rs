//! SQLite storage for patients, visits, appointments and custom medicines.
//!
//! [`Database`] also implements [`crate::analytics::ClinicDataSource`].

mod analytics;
mod appointments;
mod medicines;
mod patients;
mod schema;
mod visits;

pub use schema::*;
pub use visits::*;

use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::to_utc_timestamp;

/// Storage errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Check an RFC 3339 timestamp and convert it to stored UTC form.
fn stored_timestamp(field: &str, raw: &str) -> DbResult<String> {
    to_utc_timestamp(raw).map_err(|e| {
        DbError::Constraint(format!("{field} {raw:?} is not an RFC 3339 timestamp: {e}"))
    })
}

/// Check an optional `YYYY-MM-DD` calendar date.
fn stored_day(field: &str, raw: Option<&str>) -> DbResult<Option<String>> {
    raw.map(|raw| {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|day| day.to_string())
            .map_err(|e| DbError::Constraint(format!("{field} {raw:?} is not a date: {e}")))
    })
    .transpose()
}

/// Handle to the clinic's SQLite store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the clinic store at `path`, creating the file and schema if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open a store that lives only as long as this handle.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create any missing tables and indexes.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// The SQLite connection behind this store.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"visits".to_string()));
        assert!(tables.contains(&"appointments".to_string()));
        assert!(tables.contains(&"custom_medicines".to_string()));
    }

    #[test]
    fn test_stored_timestamp_normalizes_offsets() {
        assert_eq!(
            stored_timestamp("visit_date", "2025-11-12T23:00:00+05:30").unwrap(),
            "2025-11-12T17:30:00.000Z"
        );
        assert!(matches!(
            stored_timestamp("visit_date", "12/11/2025"),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_stored_day() {
        assert_eq!(
            stored_day("follow_up_date", Some(" 2025-11-20 ")).unwrap(),
            Some("2025-11-20".to_string())
        );
        assert_eq!(stored_day("follow_up_date", None).unwrap(), None);
        assert!(matches!(
            stored_day("follow_up_date", Some("next week")),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_reopen_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.db");

        Database::open(&path).unwrap();
        let reopened = Database::open(&path);
        assert!(reopened.is_ok());
    }
}
