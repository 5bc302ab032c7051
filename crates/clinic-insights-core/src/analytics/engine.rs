//! Report generation: fetch, run the text pipeline, rank, combine.

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::report::{avg_patients_per_day, completion_rate, growth_rate};
use super::{
    AgeGroups, AnalyticsError, AnalyticsReport, ClinicDataSource, ReportWindow, VisitText,
    WeeklyRegistration,
};
use crate::config::AnalyticsConfig;
use crate::text::{detect_conditions, extract_medicines, group_medicines, FrequencyTable, RankedEntry};
use crate::vocabulary;

/// Ranked condition and medicine tables for a batch of visits.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSummary {
    pub top_conditions: Vec<RankedEntry>,
    pub top_medicines: Vec<RankedEntry>,
    pub visits_analyzed: usize,
}

/// Count detected conditions, once per visit per condition.
pub fn tally_conditions(visits: &[VisitText]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for visit in visits {
        for condition in detect_conditions(visit.signs.as_deref()) {
            table.increment(condition);
        }
    }
    table
}

/// Count medicine mentions across visits, dosage variants collapsed.
pub fn tally_medicines(visits: &[VisitText]) -> FrequencyTable {
    let mentions: Vec<String> = visits
        .iter()
        .flat_map(|visit| extract_medicines(visit.medicines.as_deref()))
        .collect();
    group_medicines(&mentions)
}

/// Rank conditions and medicines for the given visits.
pub fn summarize_visits(visits: &[VisitText], top_n: usize) -> TextSummary {
    let conditions = tally_conditions(visits);
    let medicines = tally_medicines(visits);
    debug!(
        visits = visits.len(),
        distinct_conditions = conditions.len(),
        distinct_medicines = medicines.len(),
        "Tallied visit text"
    );

    TextSummary {
        top_conditions: conditions.rank_top(top_n),
        top_medicines: medicines.rank_top(top_n),
        visits_analyzed: visits.len(),
    }
}

/// Builds [`AnalyticsReport`]s from a [`ClinicDataSource`].
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Create an engine, checking the configuration and the built-in vocabulary.
    pub fn new(config: AnalyticsConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        vocabulary::validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Generate the report for `today`.
    ///
    /// Any fetch failure aborts the whole report and is returned as-is.
    pub fn generate_report<S: ClinicDataSource>(
        &self,
        source: &S,
        today: NaiveDate,
    ) -> Result<AnalyticsReport, S::Error> {
        let started = Instant::now();
        let window = ReportWindow::for_date(today, self.config.registration_weeks)
            .with_utc_offset_minutes(self.config.utc_offset_minutes);

        let stats = source.clinic_statistics(&window).inspect_err(|e| {
            warn!(error = %e, "Failed to fetch clinic statistics");
        })?;
        let mut visits = source
            .fetch_recent_visits(self.config.visit_window)
            .inspect_err(|e| {
                warn!(error = %e, "Failed to fetch recent visits");
            })?;
        visits.truncate(self.config.visit_window);

        let summary = summarize_visits(&visits, self.config.top_n);

        let weekly_registrations = window
            .weeks
            .iter()
            .enumerate()
            .map(|(i, week)| WeeklyRegistration {
                label: week.label.clone(),
                week_start: week.start,
                week_end: week.end,
                count: stats.weekly_registrations.get(i).copied().unwrap_or(0),
            })
            .collect();

        let report = AnalyticsReport {
            generated_on: today,
            total_patients: stats.total_patients,
            patients_this_month: stats.patients_this_month,
            patients_last_month: stats.patients_last_month,
            patients_this_week: stats.patients_this_week,
            consultations_today: stats.consultations_today,
            upcoming_follow_ups: stats.upcoming_follow_ups,
            follow_ups_this_week: stats.follow_ups_this_week,
            overdue_follow_ups: stats.overdue_follow_ups,
            growth_rate: growth_rate(stats.patients_this_month, stats.patients_last_month),
            completion_rate: completion_rate(stats.complete_records, stats.total_patients),
            avg_patients_per_day: avg_patients_per_day(
                stats.patients_this_month,
                window.day_of_month(),
            ),
            top_conditions: summary.top_conditions,
            top_medicines: summary.top_medicines,
            gender: stats.gender,
            age_groups: AgeGroups::from_ages(stats.patient_ages.iter().copied()),
            appointments: stats.appointments,
            weekly_registrations,
            visits_analyzed: summary.visits_analyzed,
        };

        info!(
            today = %today,
            visits = report.visits_analyzed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated analytics report"
        );
        Ok(report)
    }
}
