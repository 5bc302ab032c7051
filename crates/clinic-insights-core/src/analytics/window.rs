//! Calendar windows a report is computed over.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::format_utc;

/// A week of registrations, `[start, end)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekRange {
    /// "Week 1" is the oldest week shown
    pub label: String,
    pub start: NaiveDate,
    /// Exclusive
    pub end: NaiveDate,
}

/// Date boundaries for one report. Weeks start on Sunday.
///
/// Days are the clinic's local calendar days, `utc_offset_minutes` ahead of UTC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportWindow {
    pub today: NaiveDate,
    pub start_of_month: NaiveDate,
    pub start_of_last_month: NaiveDate,
    pub start_of_week: NaiveDate,
    /// Registration weeks, oldest first; the last one contains `today`
    pub weeks: Vec<WeekRange>,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl ReportWindow {
    pub fn for_date(today: NaiveDate, registration_weeks: usize) -> Self {
        let start_of_month = first_of_month(today);
        let start_of_last_month = first_of_month(start_of_month - Duration::days(1));
        let start_of_week =
            today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));

        let weeks = (0..registration_weeks)
            .rev()
            .map(|weeks_back| {
                let start = start_of_week - Duration::weeks(weeks_back as i64);
                WeekRange {
                    label: format!("Week {}", registration_weeks - weeks_back),
                    start,
                    end: start + Duration::days(7),
                }
            })
            .collect();

        Self {
            today,
            start_of_month,
            start_of_last_month,
            start_of_week,
            weeks,
            utc_offset_minutes: 0,
        }
    }

    /// Interpret the window's days on a clock `minutes` ahead of UTC.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Local midnight at the start of `day`, as a stored UTC timestamp.
    pub fn utc_bound(&self, day: NaiveDate) -> String {
        let midnight = day.and_time(NaiveTime::MIN)
            - Duration::minutes(i64::from(self.utc_offset_minutes));
        format_utc(midnight.and_utc())
    }

    /// Exclusive end of the current week.
    pub fn end_of_week(&self) -> NaiveDate {
        self.start_of_week + Duration::days(7)
    }

    /// Day of the month, 1-based.
    pub fn day_of_month(&self) -> u32 {
        self.today.day()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}
