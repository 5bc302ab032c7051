//! Analytics report export.

use super::escape_csv;
use crate::analytics::AnalyticsReport;

impl AnalyticsReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV, one `section,name,count` row per figure.
    ///
    /// Percentages and averages are written with one decimal place.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("section,name,count\n");

        let mut row = |section: &str, name: &str, value: String| {
            csv.push_str(&format!("{},{},{}\n", section, escape_csv(name), value));
        };

        for (name, value) in [
            ("total_patients", self.total_patients),
            ("patients_this_month", self.patients_this_month),
            ("patients_last_month", self.patients_last_month),
            ("patients_this_week", self.patients_this_week),
            ("consultations_today", self.consultations_today),
            ("upcoming_follow_ups", self.upcoming_follow_ups),
            ("follow_ups_this_week", self.follow_ups_this_week),
            ("overdue_follow_ups", self.overdue_follow_ups),
            ("visits_analyzed", self.visits_analyzed as u64),
        ] {
            row("summary", name, value.to_string());
        }

        for (name, value) in [
            ("growth_rate", self.growth_rate),
            ("completion_rate", self.completion_rate),
            ("avg_patients_per_day", self.avg_patients_per_day),
        ] {
            row("rate", name, format!("{:.1}", value));
        }

        for entry in &self.top_conditions {
            row("condition", &entry.name, entry.count.to_string());
        }
        for entry in &self.top_medicines {
            row("medicine", &entry.name, entry.count.to_string());
        }

        for (name, value) in [
            ("Male", self.gender.male),
            ("Female", self.gender.female),
            ("Other", self.gender.other),
        ] {
            row("gender", name, value.to_string());
        }

        for (label, value) in self.age_groups.labeled() {
            row("age_group", label, value.to_string());
        }

        for (name, value) in [
            ("total", self.appointments.total),
            ("existing_patients", self.appointments.existing_patients),
            ("new_patients", self.appointments.new_patients),
        ] {
            row("appointments", name, value.to_string());
        }

        for week in &self.weekly_registrations {
            row("weekly_registrations", &week.label, week.count.to_string());
        }

        csv
    }
}
