use serde::{Deserialize, Serialize};

use crate::shared::view::{ColumnDef, StatusCount, VehicleRow, ViewState};

/// Request for the administrative documents dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDocumentsRequest {
    pub admin_status: Option<String>,
    /// Only invoiced vehicles whose paperwork is not available yet
    #[serde(default)]
    pub pending_only: bool,
}

/// Response for the administrative documents dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDocumentsResponse {
    pub state: ViewState,
    /// Counts per administrative status, largest first
    pub statuses: Vec<StatusCount>,
    pub invoiced_count: usize,
    pub paperwork_available_count: usize,
    /// Invoiced but paperwork date still empty
    pub pending_paperwork_count: usize,
    pub selected_status: Option<String>,
    pub pending_only: bool,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<VehicleRow>,
}
