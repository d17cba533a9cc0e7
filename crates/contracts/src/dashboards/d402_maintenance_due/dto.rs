use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::view::{ColumnDef, VehicleRow, ViewState};

/// Request for the maintenance due dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceDueRequest {
    /// Reference date override, defaults to the server's local date
    pub today: Option<NaiveDate>,
}

/// Response for the maintenance due dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceDueResponse {
    pub state: ViewState,
    pub reference_date: NaiveDate,
    /// Monday of the reference week
    pub week_start: NaiveDate,
    /// Sunday of the reference week
    pub week_end: NaiveDate,
    /// Intervals (days after arrival) that have a completion marker column
    pub tracked_intervals: Vec<u32>,
    pub columns: Vec<ColumnDef>,
    pub due_today: Vec<VehicleRow>,
    pub due_this_week: Vec<VehicleRow>,
    pub overdue: Vec<VehicleRow>,
}
