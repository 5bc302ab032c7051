//! Custom medicine database operations.

use rusqlite::params;

use super::{Database, DbError, DbResult};
use crate::models::{timestamp_now, CustomMedicine, MIN_CUSTOM_MEDICINE_LEN};

impl Database {
    /// Remember a medicine name, or bump its usage count if already known.
    pub fn record_custom_medicine(&self, name: &str) -> DbResult<CustomMedicine> {
        let name = name.trim();
        if name.chars().count() < MIN_CUSTOM_MEDICINE_LEN {
            return Err(DbError::Constraint(format!(
                "Medicine name must be at least {} characters",
                MIN_CUSTOM_MEDICINE_LEN
            )));
        }

        let now = timestamp_now();
        self.conn.execute(
            r#"
            INSERT INTO custom_medicines (name, usage_count, created_at, updated_at)
            VALUES (?1, 1, ?2, ?2)
            ON CONFLICT(name) DO UPDATE SET
                usage_count = usage_count + 1,
                updated_at = excluded.updated_at
            "#,
            params![name, now],
        )?;

        self.conn
            .query_row(
                "SELECT name, usage_count, created_at, updated_at FROM custom_medicines WHERE name = ?",
                [name],
                |row| {
                    Ok(CustomMedicine {
                        name: row.get(0)?,
                        usage_count: row.get(1)?,
                        created_at: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            )
            .map_err(Into::into)
    }

    /// Custom medicines, most used first, then by name.
    pub fn list_custom_medicines(&self) -> DbResult<Vec<CustomMedicine>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name, usage_count, created_at, updated_at
            FROM custom_medicines
            ORDER BY usage_count DESC, name ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(CustomMedicine {
                name: row.get(0)?,
                usage_count: row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new_and_existing() {
        let db = Database::open_in_memory().unwrap();

        let first = db.record_custom_medicine("Becocnx 60K").unwrap();
        assert_eq!(first.usage_count, 1);

        let second = db.record_custom_medicine("  Becocnx 60K ").unwrap();
        assert_eq!(second.usage_count, 2);
        assert_eq!(second.name, "Becocnx 60K");
    }

    #[test]
    fn test_rejects_short_names() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.record_custom_medicine("bec"),
            Err(DbError::Constraint(_))
        ));
        assert!(db.list_custom_medicines().unwrap().is_empty());
    }

    #[test]
    fn test_list_order() {
        let db = Database::open_in_memory().unwrap();
        db.record_custom_medicine("Zincovit").unwrap();
        db.record_custom_medicine("Aciloc 150").unwrap();
        db.record_custom_medicine("Zincovit").unwrap();
        db.record_custom_medicine("Betadine").unwrap();

        let names: Vec<String> = db
            .list_custom_medicines()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Zincovit", "Aciloc 150", "Betadine"]);
    }
}
