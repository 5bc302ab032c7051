//! [`ClinicDataSource`] backed by the SQLite store.

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, Params};

use super::{Database, DbError, DbResult};
use crate::analytics::{
    AppointmentBreakdown, ClinicDataSource, ClinicStatistics, GenderBreakdown, ReportWindow,
    VisitText,
};

fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn count<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<u64> {
    let n: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    Ok(n.max(0) as u64)
}

/// Patients registered on local days `[start, end)`; open-ended without `end`.
fn patients_created_between(
    conn: &Connection,
    window: &ReportWindow,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> rusqlite::Result<u64> {
    match end {
        Some(end) => count(
            conn,
            "SELECT COUNT(*) FROM patients WHERE created_at >= ?1 AND created_at < ?2",
            params![window.utc_bound(start), window.utc_bound(end)],
        ),
        None => count(
            conn,
            "SELECT COUNT(*) FROM patients WHERE created_at >= ?1",
            params![window.utc_bound(start)],
        ),
    }
}

fn gender_breakdown(conn: &Connection) -> rusqlite::Result<GenderBreakdown> {
    let by_gender = |gender: &str| {
        count(
            conn,
            "SELECT COUNT(*) FROM patients WHERE gender = ?1",
            params![gender],
        )
    };
    Ok(GenderBreakdown {
        male: by_gender("Male")?,
        female: by_gender("Female")?,
        other: by_gender("Other")?,
    })
}

fn appointment_breakdown(conn: &Connection) -> rusqlite::Result<AppointmentBreakdown> {
    let total = count(conn, "SELECT COUNT(*) FROM appointments", [])?;
    let existing_patients = count(
        conn,
        "SELECT COUNT(*) FROM appointments WHERE patient_id IS NOT NULL",
        [],
    )?;
    Ok(AppointmentBreakdown {
        total,
        existing_patients,
        new_patients: total - existing_patients,
    })
}

fn patient_ages(conn: &Connection) -> rusqlite::Result<Vec<u32>> {
    let mut stmt = conn.prepare("SELECT age FROM patients WHERE age IS NOT NULL")?;
    let ages = stmt.query_map([], |row| row.get::<_, u32>(0))?;
    ages.collect()
}

impl Database {
    fn read_statistics(&self, window: &ReportWindow) -> DbResult<ClinicStatistics> {
        // One read transaction so every count sees the same snapshot.
        let tx = self.conn.unchecked_transaction()?;
        let today = day(window.today);

        let total_patients = count(&tx, "SELECT COUNT(*) FROM patients", [])?;
        let patients_this_month =
            patients_created_between(&tx, window, window.start_of_month, None)?;
        let patients_last_month = patients_created_between(
            &tx,
            window,
            window.start_of_last_month,
            Some(window.start_of_month),
        )?;
        let patients_this_week =
            patients_created_between(&tx, window, window.start_of_week, None)?;

        let consultations_today = count(
            &tx,
            "SELECT COUNT(*) FROM visits WHERE visit_date >= ?1 AND visit_date < ?2",
            params![
                window.utc_bound(window.today),
                window.utc_bound(window.today + Duration::days(1))
            ],
        )?;
        let upcoming_follow_ups = count(
            &tx,
            "SELECT COUNT(*) FROM visits WHERE follow_up_date >= ?1",
            params![today],
        )?;
        let follow_ups_this_week = count(
            &tx,
            "SELECT COUNT(*) FROM visits WHERE follow_up_date >= ?1 AND follow_up_date < ?2",
            params![day(window.start_of_week), day(window.end_of_week())],
        )?;
        let overdue_follow_ups = count(
            &tx,
            "SELECT COUNT(*) FROM visits WHERE follow_up_date IS NOT NULL AND follow_up_date < ?1",
            params![today],
        )?;
        let complete_records = count(
            &tx,
            r#"
            SELECT COUNT(*) FROM patients p
            WHERE EXISTS (
                SELECT 1 FROM visits v
                WHERE v.patient_id = p.patient_id
                  AND v.signs IS NOT NULL
                  AND v.diagnosis IS NOT NULL
                  AND v.treatment IS NOT NULL
            )
            "#,
            [],
        )?;

        let weekly_registrations = window
            .weeks
            .iter()
            .map(|week| patients_created_between(&tx, window, week.start, Some(week.end)))
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let stats = ClinicStatistics {
            total_patients,
            patients_this_month,
            patients_last_month,
            patients_this_week,
            consultations_today,
            upcoming_follow_ups,
            follow_ups_this_week,
            overdue_follow_ups,
            complete_records,
            gender: gender_breakdown(&tx)?,
            patient_ages: patient_ages(&tx)?,
            appointments: appointment_breakdown(&tx)?,
            weekly_registrations,
        };

        tx.commit()?;
        Ok(stats)
    }
}

impl ClinicDataSource for Database {
    type Error = DbError;

    fn fetch_recent_visits(&self, limit: usize) -> Result<Vec<VisitText>, DbError> {
        self.recent_visit_text(limit)
    }

    fn clinic_statistics(&self, window: &ReportWindow) -> Result<ClinicStatistics, DbError> {
        self.read_statistics(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Gender, Patient, Visit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn patient(db: &Database, id: &str, created_at: &str, age: Option<u32>, gender: Gender) {
        let mut p = Patient::new(id.into(), format!("Patient {id}"));
        p.created_at = created_at.into();
        p.updated_at = created_at.into();
        p.age = age;
        p.gender = Some(gender);
        db.insert_patient(&p).unwrap();
    }

    fn visit(patient_id: &str, visit_date: &str, follow_up: Option<&str>) -> Visit {
        let mut v = Visit::new(patient_id.into());
        v.visit_date = visit_date.into();
        v.follow_up_date = follow_up.map(Into::into);
        v
    }

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        // Today is Thursday 2025-11-13; the week started Sunday 2025-11-09.
        patient(&db, "FC-001", "2025-10-02T09:00:00+00:00", Some(42), Gender::Male);
        patient(&db, "FC-002", "2025-10-31T18:00:00+00:00", Some(18), Gender::Female);
        patient(&db, "FC-003", "2025-11-03T11:00:00+00:00", None, Gender::Female);
        patient(&db, "FC-004", "2025-11-09T08:00:00+00:00", Some(70), Gender::Other);
        patient(&db, "FC-005", "2025-11-13T10:00:00+00:00", Some(30), Gender::Male);

        let mut complete = visit("FC-001", "2025-11-13T09:30:00+00:00", Some("2025-11-20"));
        complete.signs = Some("fever".into());
        complete.diagnosis = Some("Viral fever".into());
        complete.treatment = Some("Rest".into());
        db.insert_visit(&complete).unwrap();

        let mut partial = visit("FC-002", "2025-11-10T12:00:00+00:00", Some("2025-11-11"));
        partial.signs = Some("cough".into());
        db.insert_visit(&partial).unwrap();

        db.insert_visit(&visit("FC-003", "2025-11-13T15:00:00+00:00", Some("2025-11-13")))
            .unwrap();
        db.insert_visit(&visit("FC-004", "2025-11-01T10:00:00+00:00", None))
            .unwrap();

        let mut booked = Appointment::new("Patient FC-001".into(), "2025-11-21T10:00:00Z".into());
        booked.patient_id = Some("FC-001".into());
        db.insert_appointment(&booked).unwrap();
        db.insert_appointment(&Appointment::new("Walk-in".into(), "2025-11-22T10:00:00Z".into()))
            .unwrap();
        db
    }

    #[test]
    fn test_registration_counts() {
        let db = seeded();
        let window = ReportWindow::for_date(date(2025, 11, 13), 8);
        let stats = db.clinic_statistics(&window).unwrap();

        assert_eq!(stats.total_patients, 5);
        assert_eq!(stats.patients_this_month, 3);
        assert_eq!(stats.patients_last_month, 2);
        assert_eq!(stats.patients_this_week, 2);
        assert_eq!(stats.weekly_registrations.len(), 8);
        assert_eq!(stats.weekly_registrations[7], 2);
        assert_eq!(stats.weekly_registrations.iter().sum::<u64>(), 5);
    }

    #[test]
    fn test_visit_and_follow_up_counts() {
        let db = seeded();
        let window = ReportWindow::for_date(date(2025, 11, 13), 8);
        let stats = db.clinic_statistics(&window).unwrap();

        assert_eq!(stats.consultations_today, 2);
        assert_eq!(stats.upcoming_follow_ups, 2);
        assert_eq!(stats.follow_ups_this_week, 2);
        assert_eq!(stats.overdue_follow_ups, 1);
        assert_eq!(stats.complete_records, 1);
    }

    #[test]
    fn test_demographics_and_appointments() {
        let db = seeded();
        let window = ReportWindow::for_date(date(2025, 11, 13), 8);
        let stats = db.clinic_statistics(&window).unwrap();

        assert_eq!(
            stats.gender,
            GenderBreakdown {
                male: 2,
                female: 2,
                other: 1
            }
        );
        let mut ages = stats.patient_ages.clone();
        ages.sort_unstable();
        assert_eq!(ages, vec![18, 30, 42, 70]);
        assert_eq!(
            stats.appointments,
            AppointmentBreakdown {
                total: 2,
                existing_patients: 1,
                new_patients: 1
            }
        );
    }

    #[test]
    fn test_empty_store() {
        let db = Database::open_in_memory().unwrap();
        let window = ReportWindow::for_date(date(2025, 11, 13), 4);
        let stats = db.clinic_statistics(&window).unwrap();
        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.weekly_registrations, vec![0, 0, 0, 0]);
        assert!(db.fetch_recent_visits(10).unwrap().is_empty());
    }

    #[test]
    fn test_mixed_offsets_use_instants() {
        let db = Database::open_in_memory().unwrap();
        patient(&db, "FC-001", "2025-11-01T09:00:00+05:30", None, Gender::Female);

        // 21:30 UTC is 03:00 on the 13th in IST, later than 23:00 IST on the 12th.
        let mut later = visit("FC-001", "2025-11-12T21:30:00+00:00", None);
        later.signs = Some("fever".into());
        db.insert_visit(&later).unwrap();
        let mut earlier = visit("FC-001", "2025-11-12T23:00:00+05:30", None);
        earlier.signs = Some("cough".into());
        db.insert_visit(&earlier).unwrap();

        let recent = db.fetch_recent_visits(1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].signs.as_deref(), Some("fever"));
        assert_eq!(recent[0].visit_date, "2025-11-12T21:30:00.000Z");

        let ist = ReportWindow::for_date(date(2025, 11, 13), 8).with_utc_offset_minutes(330);
        let stats = db.clinic_statistics(&ist).unwrap();
        assert_eq!(stats.consultations_today, 1);
        assert_eq!(stats.patients_this_month, 1);

        let utc = ReportWindow::for_date(date(2025, 11, 12), 8);
        assert_eq!(db.clinic_statistics(&utc).unwrap().consultations_today, 2);
    }

    #[test]
    fn test_registration_near_month_boundary() {
        let db = Database::open_in_memory().unwrap();
        // 2025-11-01 00:30 in IST, still October in UTC.
        patient(&db, "FC-001", "2025-10-31T19:00:00Z", None, Gender::Male);

        let utc = ReportWindow::for_date(date(2025, 11, 13), 8);
        let stats = db.clinic_statistics(&utc).unwrap();
        assert_eq!((stats.patients_this_month, stats.patients_last_month), (0, 1));

        let ist = utc.with_utc_offset_minutes(330);
        let stats = db.clinic_statistics(&ist).unwrap();
        assert_eq!((stats.patients_this_month, stats.patients_last_month), (1, 0));
    }
}
