//! Maintenance Scheduler: derives per-vehicle service obligations from the
//! arrival date and sorts the unresolved ones into three buckets.

use chrono::{Days, NaiveDate};

use crate::domain::a001_vehicle::VehicleRecord;
use crate::shared::columns::dates::week_bounds;
use crate::shared::columns::normalize::normalize_token;
use crate::shared::columns::ResolvedColumns;
use crate::shared::format::format_date_dmy;

/// Marker values that count as "service done" (compared after normalization)
pub const AFFIRMATIVE_TOKENS: &[&str] = &["OK", "SI", "YES", "N/A", "NA", "X", "HECHO", "REALIZADO"];

/// Buckets one record falls into. Each is at most one label: intervals are
/// at least 30 days apart, so only one can land on a given day or week, and
/// for overdue the last-evaluated (largest) interval overwrites earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDue {
    pub today: Option<String>,
    pub this_week: Option<String>,
    pub overdue: Option<String>,
}

/// Records with their reason label, per bucket, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceBuckets<'a> {
    pub due_today: Vec<(&'a VehicleRecord, String)>,
    pub due_this_week: Vec<(&'a VehicleRecord, String)>,
    pub overdue: Vec<(&'a VehicleRecord, String)>,
}

impl MaintenanceBuckets<'_> {
    pub fn is_empty(&self) -> bool {
        self.due_today.is_empty() && self.due_this_week.is_empty() && self.overdue.is_empty()
    }
}

/// `due_date(interval) = arrival_date + interval days`
pub fn due_date(arrival: NaiveDate, interval_days: u32) -> Option<NaiveDate> {
    arrival.checked_add_days(Days::new(u64::from(interval_days)))
}

/// Marker value counts as done when it is one of the affirmative tokens
pub fn is_satisfied(marker: Option<&str>) -> bool {
    marker
        .map(normalize_token)
        .is_some_and(|m| AFFIRMATIVE_TOKENS.contains(&m.as_str()))
}

/// Classify a single record. Pure; delivered records and records without an
/// arrival date fall into no bucket.
pub fn classify_record(
    record: &VehicleRecord,
    columns: &ResolvedColumns,
    intervals: &[u32],
    reference: NaiveDate,
) -> RecordDue {
    let mut due = RecordDue::default();
    if record.is_delivered() {
        return due;
    }
    let Some(arrival) = record.arrival_date else {
        return due;
    };

    let mut ordered = intervals.to_vec();
    ordered.sort_unstable();
    ordered.dedup();
    let (week_start, week_end) = week_bounds(reference);

    for days in ordered {
        // An interval without a marker column is not tracked for anyone
        if columns.marker(days).is_none() {
            continue;
        }
        let Some(due_on) = due_date(arrival, days) else {
            continue;
        };
        if is_satisfied(record.completion_marker(days)) {
            continue;
        }

        if due_on == reference {
            due.today = Some(format!("Control {} days", days));
        }
        if week_start <= due_on && due_on <= week_end {
            due.this_week = Some(format!("Control {} days ({})", days, format_date_dmy(due_on)));
        }
        if due_on <= reference {
            due.overdue = Some(format!(
                "Control {} days (due {})",
                days,
                format_date_dmy(due_on)
            ));
        }
    }

    due
}

/// Classify every record into due today / due this week / overdue
pub fn classify<'a>(
    records: &'a [VehicleRecord],
    columns: &ResolvedColumns,
    intervals: &[u32],
    reference: NaiveDate,
) -> MaintenanceBuckets<'a> {
    records
        .iter()
        .fold(MaintenanceBuckets::default(), |mut buckets, record| {
            let due = classify_record(record, columns, intervals, reference);
            if let Some(label) = due.today {
                buckets.due_today.push((record, label));
            }
            if let Some(label) = due.this_week {
                buckets.due_this_week.push((record, label));
            }
            if let Some(label) = due.overdue {
                buckets.overdue.push((record, label));
            }
            buckets
        })
}
