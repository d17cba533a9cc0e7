use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical field located inside the free-form spreadsheet header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    DeliveryDate,
    ArrivalDate,
    InvoicingDate,
    PaperworkDate,
    Phone,
    Email,
    AdminStatus,
    LifecycleStatus,
    Vin,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 9] = [
        ColumnRole::DeliveryDate,
        ColumnRole::ArrivalDate,
        ColumnRole::InvoicingDate,
        ColumnRole::PaperworkDate,
        ColumnRole::Phone,
        ColumnRole::Email,
        ColumnRole::AdminStatus,
        ColumnRole::LifecycleStatus,
        ColumnRole::Vin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::DeliveryDate => "delivery_date",
            ColumnRole::ArrivalDate => "arrival_date",
            ColumnRole::InvoicingDate => "invoicing_date",
            ColumnRole::PaperworkDate => "paperwork_date",
            ColumnRole::Phone => "phone",
            ColumnRole::Email => "email",
            ColumnRole::AdminStatus => "admin_status",
            ColumnRole::LifecycleStatus => "lifecycle_status",
            ColumnRole::Vin => "vin",
        }
    }
}

/// Response for GET /api/columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsInfoResponse {
    /// Role -> header name, `None` when the role did not resolve
    pub roles: BTreeMap<ColumnRole, Option<String>>,
    /// Service intervals (days) that have a completion marker column
    pub tracked_intervals: Vec<u32>,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub loaded_at: DateTime<Utc>,
    pub load_error: Option<String>,
}
