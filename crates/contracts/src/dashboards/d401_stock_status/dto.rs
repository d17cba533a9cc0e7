use serde::{Deserialize, Serialize};

use crate::shared::view::{ColumnDef, StatusCount, VehicleRow, ViewState};

/// Request for the stock status dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockStatusRequest {
    /// Lifecycle status to list; all vehicles in stock when absent
    pub status: Option<String>,
}

/// Response for the stock status dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockStatusResponse {
    pub state: ViewState,
    /// Vehicles not yet delivered
    pub in_stock: usize,
    /// Counts per lifecycle status, largest first
    pub statuses: Vec<StatusCount>,
    pub selected_status: Option<String>,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<VehicleRow>,
}
