use chrono::NaiveDate;
use contracts::shared::columns::ColumnRole;
use std::collections::BTreeMap;

use crate::shared::columns::dates::{parse_day_first, CalendarFields};
use crate::shared::columns::normalize::normalize_token;
use crate::shared::columns::ResolvedColumns;

/// Service intervals in days after arrival, ascending
pub const SERVICE_INTERVALS: [u32; 6] = [30, 60, 90, 180, 360, 540];

/// Lifecycle status values meaning the vehicle left the dealership
pub const DELIVERED_STATUSES: &[&str] = &["ENTREGADO", "DELIVERED"];

/// One row of the source table.
///
/// Built once per reload and never mutated afterwards. Resolved date fields
/// are either a valid date or `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    cells: Vec<String>,
    pub vin: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
    pub invoicing_date: Option<NaiveDate>,
    pub paperwork_date: Option<NaiveDate>,
    pub lifecycle_status: Option<String>,
    pub admin_status: Option<String>,
    pub phone_clean: Option<String>,
    pub email_clean: Option<String>,
    completion_markers: BTreeMap<u32, String>,
}

impl VehicleRecord {
    pub fn from_cells(cells: Vec<String>, columns: &ResolvedColumns) -> Self {
        let text = |role: ColumnRole| -> Option<String> {
            columns
                .index(role)
                .and_then(|i| cells.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let date = |role: ColumnRole| text(role).and_then(|v| parse_day_first(&v));

        let completion_markers = columns
            .tracked_intervals()
            .into_iter()
            .filter_map(|days| {
                let column = columns.marker(days)?;
                let value = cells.get(column.index)?.trim();
                (!value.is_empty()).then(|| (days, value.to_string()))
            })
            .collect();

        Self {
            vin: text(ColumnRole::Vin),
            delivery_date: date(ColumnRole::DeliveryDate),
            arrival_date: date(ColumnRole::ArrivalDate),
            invoicing_date: date(ColumnRole::InvoicingDate),
            paperwork_date: date(ColumnRole::PaperworkDate),
            lifecycle_status: text(ColumnRole::LifecycleStatus),
            admin_status: text(ColumnRole::AdminStatus),
            phone_clean: text(ColumnRole::Phone).and_then(|v| clean_phone(&v)),
            email_clean: text(ColumnRole::Email).and_then(|v| clean_email(&v)),
            completion_markers,
            cells,
        }
    }

    /// Raw cell by column position; `None` when blank
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells
            .get(index)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Completion marker text for a service interval; `None` when blank or untracked
    pub fn completion_marker(&self, interval_days: u32) -> Option<&str> {
        self.completion_markers.get(&interval_days).map(String::as_str)
    }

    pub fn delivery_calendar(&self) -> Option<CalendarFields> {
        self.delivery_date.map(CalendarFields::from_date)
    }

    /// Lifecycle status equals "delivered", ignoring case, accents and spacing
    pub fn is_delivered(&self) -> bool {
        self.lifecycle_status
            .as_deref()
            .map(normalize_token)
            .is_some_and(|s| DELIVERED_STATUSES.contains(&s.as_str()))
    }
}

/// Keep the digits of a phone number, plus a leading `+`
fn clean_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    if raw.trim_start().starts_with('+') {
        Some(format!("+{}", digits))
    } else {
        Some(digits)
    }
}

fn clean_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    email.contains('@').then_some(email)
}
