use contracts::dashboards::d401_stock_status::{StockStatusRequest, StockStatusResponse};
use contracts::shared::columns::ColumnRole;
use contracts::shared::view::ViewState;

use crate::dashboards::table_layout::{
    count_by, precondition, state_for, status_key, TableLayout, ViewColumn,
};
use crate::domain::a001_vehicle::{Snapshot, VehicleRecord};
use crate::shared::columns::normalize::normalize_token;

const COLUMNS: &[ViewColumn] = &[
    ViewColumn::Role(ColumnRole::Vin, "VIN"),
    ViewColumn::Raw("MARCA"),
    ViewColumn::Raw("MODELO"),
    ViewColumn::Raw("COLOR"),
    ViewColumn::Role(ColumnRole::LifecycleStatus, "Status"),
    ViewColumn::Role(ColumnRole::AdminStatus, "Admin status"),
    ViewColumn::Role(ColumnRole::ArrivalDate, "Arrival date"),
    ViewColumn::Raw("CLIENTE"),
];

/// Build the stock view: vehicles not yet delivered, grouped by lifecycle status
pub fn build_stock_status(snapshot: &Snapshot, request: &StockStatusRequest) -> StockStatusResponse {
    let mut response = StockStatusResponse {
        state: ViewState::Ready,
        in_stock: 0,
        statuses: Vec::new(),
        selected_status: None,
        columns: Vec::new(),
        rows: Vec::new(),
    };

    if let Some(state) = precondition(snapshot, ColumnRole::LifecycleStatus) {
        response.state = state;
        return response;
    }

    let stock: Vec<(&VehicleRecord, String)> = snapshot
        .records
        .iter()
        .filter(|r| !r.is_delivered())
        .map(|r| (r, status_key(r.lifecycle_status.as_deref())))
        .collect();

    response.in_stock = stock.len();
    response.statuses = count_by(stock.iter().map(|(_, key)| key.as_str()));

    let selected = request
        .status
        .as_deref()
        .map(normalize_token)
        .filter(|s| !s.is_empty());

    let mut rows: Vec<&VehicleRecord> = stock
        .iter()
        .filter(|(_, key)| selected.as_ref().map_or(true, |s| key == s))
        .map(|(record, _)| *record)
        .collect();
    // Oldest arrivals first, undated last
    rows.sort_by_key(|r| (r.arrival_date.is_none(), r.arrival_date));

    let layout = TableLayout::bind(snapshot, COLUMNS);
    response.columns = layout.columns();
    response.rows = rows.into_iter().map(|r| layout.row(r, None)).collect();
    response.selected_status = selected;
    response.state = state_for(&response.rows);

    response
}
