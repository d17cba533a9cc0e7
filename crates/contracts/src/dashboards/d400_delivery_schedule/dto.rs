use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::view::{ColumnDef, VehicleRow, ViewState};

/// Which slice of the delivery agenda is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryViewMode {
    /// Delivery date before today
    Delivered,
    /// Delivery date today or later
    #[default]
    Scheduled,
    /// One month of the year, optionally narrowed to one day
    Month,
}

/// Request for the delivery schedule dashboard.
///
/// This is the whole per-session selection state; the server keeps none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryScheduleRequest {
    /// Defaults to the latest year present in the data
    pub year: Option<i32>,
    #[serde(default)]
    pub mode: DeliveryViewMode,
    /// 1-based month number, `Month` mode only
    pub month: Option<u32>,
    /// Single day filter, `Month` mode only
    pub day: Option<NaiveDate>,
    /// Reference date override, defaults to the server's local date
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOption {
    pub number: u32,
    pub name: String,
}

/// Response for the delivery schedule dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryScheduleResponse {
    pub state: ViewState,
    /// Years with at least one delivery date, ascending
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub mode: DeliveryViewMode,
    pub delivered_count: usize,
    pub scheduled_count: usize,
    /// Months present in the selected year, ordered by number
    pub months: Vec<MonthOption>,
    pub selected_month: Option<u32>,
    /// Bounds for the day picker of the selected month
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub title: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<VehicleRow>,
}
