use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::columns::ColumnRole;

/// Outcome of rendering a dashboard view.
///
/// `LoadFailed` is distinct from `NoMatches`: the first means the source table
/// could not be fetched, the second that the table loaded but the selected
/// filter left nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    Ready,
    NoMatches,
    Unavailable { role: ColumnRole },
    LoadFailed { message: String },
}

/// Column shown in a view table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Key into `VehicleRow::values`
    pub key: String,
    pub title: String,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Single vehicle row in a view table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRow {
    pub vin: Option<String>,
    /// Column key -> display value. Missing keys are empty cells.
    pub values: HashMap<String, String>,
    /// Reason label (maintenance buckets only)
    pub label: Option<String>,
}

/// Number of records carrying a given category value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}
