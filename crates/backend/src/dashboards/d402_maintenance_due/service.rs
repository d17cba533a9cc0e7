use chrono::NaiveDate;
use contracts::dashboards::d402_maintenance_due::MaintenanceDueResponse;
use contracts::shared::columns::ColumnRole;
use contracts::shared::view::{VehicleRow, ViewState};

use super::scheduler::{classify, MaintenanceBuckets};
use crate::dashboards::table_layout::{precondition, TableLayout, ViewColumn};
use crate::domain::a001_vehicle::{Snapshot, VehicleRecord, SERVICE_INTERVALS};
use crate::shared::columns::dates::week_bounds;

const COLUMNS: &[ViewColumn] = &[
    ViewColumn::Role(ColumnRole::Vin, "VIN"),
    ViewColumn::Raw("MARCA"),
    ViewColumn::Raw("MODELO"),
    ViewColumn::Raw("CLIENTE"),
    ViewColumn::Role(ColumnRole::ArrivalDate, "Arrival date"),
    ViewColumn::Role(ColumnRole::LifecycleStatus, "Status"),
    ViewColumn::Role(ColumnRole::Phone, "Phone"),
    ViewColumn::Role(ColumnRole::Email, "Email"),
];

/// Build the maintenance due dashboard for the given reference date
pub fn build_maintenance_due(snapshot: &Snapshot, reference: NaiveDate) -> MaintenanceDueResponse {
    let (week_start, week_end) = week_bounds(reference);
    let mut response = MaintenanceDueResponse {
        state: ViewState::Ready,
        reference_date: reference,
        week_start,
        week_end,
        tracked_intervals: Vec::new(),
        columns: Vec::new(),
        due_today: Vec::new(),
        due_this_week: Vec::new(),
        overdue: Vec::new(),
    };

    if let Some(state) = precondition(snapshot, ColumnRole::ArrivalDate) {
        response.state = state;
        return response;
    }

    let buckets = classify(
        &snapshot.records,
        &snapshot.columns,
        &SERVICE_INTERVALS,
        reference,
    );
    let layout = TableLayout::bind(snapshot, COLUMNS);

    response.state = if buckets.is_empty() {
        ViewState::NoMatches
    } else {
        ViewState::Ready
    };
    response.tracked_intervals = snapshot.columns.tracked_intervals();
    response.columns = layout.columns();

    let MaintenanceBuckets {
        due_today,
        due_this_week,
        overdue,
    } = buckets;
    response.due_today = to_rows(&layout, due_today);
    response.due_this_week = to_rows(&layout, due_this_week);
    response.overdue = to_rows(&layout, overdue);

    response
}

fn to_rows(layout: &TableLayout, bucket: Vec<(&VehicleRecord, String)>) -> Vec<VehicleRow> {
    bucket
        .into_iter()
        .map(|(record, label)| layout.row(record, Some(label)))
        .collect()
}
