//! Report structures and the ratio formulas behind the dashboard cards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::text::RankedEntry;

/// Patients by gender.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderBreakdown {
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

/// Appointments by whether the patient is already registered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentBreakdown {
    pub total: u64,
    pub existing_patients: u64,
    pub new_patients: u64,
}

/// Patients bucketed into fixed age bands (inclusive upper bounds).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeGroups {
    pub up_to_18: u64,
    pub from_19_to_35: u64,
    pub from_36_to_50: u64,
    pub from_51_to_65: u64,
    pub over_65: u64,
}

impl AgeGroups {
    pub fn from_ages<I: IntoIterator<Item = u32>>(ages: I) -> Self {
        let mut groups = Self::default();
        for age in ages {
            groups.add(age);
        }
        groups
    }

    pub fn add(&mut self, age: u32) {
        let bucket = match age {
            0..=18 => &mut self.up_to_18,
            19..=35 => &mut self.from_19_to_35,
            36..=50 => &mut self.from_36_to_50,
            51..=65 => &mut self.from_51_to_65,
            _ => &mut self.over_65,
        };
        *bucket += 1;
    }

    /// Dashboard labels with their counts, youngest band first.
    pub fn labeled(&self) -> [(&'static str, u64); 5] {
        [
            ("0-18", self.up_to_18),
            ("19-35", self.from_19_to_35),
            ("36-50", self.from_36_to_50),
            ("51-65", self.from_51_to_65),
            ("65+", self.over_65),
        ]
    }

    pub fn total(&self) -> u64 {
        self.labeled().iter().map(|(_, n)| n).sum()
    }
}

/// New registrations in one week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyRegistration {
    pub label: String,
    pub week_start: NaiveDate,
    /// Exclusive
    pub week_end: NaiveDate,
    pub count: u64,
}

/// Scalar counts supplied by the storage layer for one [`super::ReportWindow`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClinicStatistics {
    pub total_patients: u64,
    pub patients_this_month: u64,
    pub patients_last_month: u64,
    pub patients_this_week: u64,
    pub consultations_today: u64,
    pub upcoming_follow_ups: u64,
    pub follow_ups_this_week: u64,
    pub overdue_follow_ups: u64,
    /// Patients with at least one visit that has signs, diagnosis and treatment
    pub complete_records: u64,
    pub gender: GenderBreakdown,
    /// Ages of patients whose age is recorded
    pub patient_ages: Vec<u32>,
    pub appointments: AppointmentBreakdown,
    /// One count per window week, same order
    pub weekly_registrations: Vec<u64>,
}

/// The aggregated analytics dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    pub generated_on: NaiveDate,
    pub total_patients: u64,
    pub patients_this_month: u64,
    pub patients_last_month: u64,
    pub patients_this_week: u64,
    pub consultations_today: u64,
    pub upcoming_follow_ups: u64,
    pub follow_ups_this_week: u64,
    pub overdue_follow_ups: u64,
    /// Month-over-month growth, percent
    pub growth_rate: f64,
    /// Share of patients with a complete record, percent
    pub completion_rate: f64,
    pub avg_patients_per_day: f64,
    pub top_conditions: Vec<RankedEntry>,
    pub top_medicines: Vec<RankedEntry>,
    pub gender: GenderBreakdown,
    pub age_groups: AgeGroups,
    pub appointments: AppointmentBreakdown,
    pub weekly_registrations: Vec<WeeklyRegistration>,
    /// How many visits fed the condition and medicine rankings
    pub visits_analyzed: usize,
}

/// `(this - last) / last * 100`, or 0 when there was nothing last month.
pub fn growth_rate(this_month: u64, last_month: u64) -> f64 {
    if last_month == 0 {
        return 0.0;
    }
    (this_month as f64 - last_month as f64) / last_month as f64 * 100.0
}

/// `complete / total * 100`, or 0 with no patients.
pub fn completion_rate(complete_records: u64, total_patients: u64) -> f64 {
    if total_patients == 0 {
        return 0.0;
    }
    complete_records as f64 / total_patients as f64 * 100.0
}

/// New patients this month per elapsed day of the month.
pub fn avg_patients_per_day(patients_this_month: u64, day_of_month: u32) -> f64 {
    patients_this_month as f64 / f64::from(day_of_month.max(1))
}
