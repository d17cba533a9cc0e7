use chrono::{DateTime, Utc};

use super::model::{VehicleRecord, SERVICE_INTERVALS};
use crate::shared::columns::normalize::normalize_token;
use crate::shared::columns::{resolve, ResolvedColumns};
use crate::shared::source::RawTable;

/// The whole vehicle table as of one reload.
///
/// Immutable once built; shared between requests behind an `Arc` and
/// replaced as a whole on the next reload.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub headers: Vec<String>,
    pub columns: ResolvedColumns,
    pub records: Vec<VehicleRecord>,
    pub loaded_at: DateTime<Utc>,
    /// Set when the source could not be fetched or parsed; the table is then empty
    pub load_error: Option<String>,
}

impl Snapshot {
    pub fn from_table(table: RawTable) -> Self {
        let columns = resolve(&table.headers, &SERVICE_INTERVALS);
        let records = table
            .rows
            .into_iter()
            .map(|cells| VehicleRecord::from_cells(cells, &columns))
            .collect();

        Self {
            headers: table.headers,
            columns,
            records,
            loaded_at: Utc::now(),
            load_error: None,
        }
    }

    /// Empty table standing in for a failed load
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            headers: Vec::new(),
            columns: ResolvedColumns::default(),
            records: Vec::new(),
            loaded_at: Utc::now(),
            load_error: Some(message.into()),
        }
    }

    /// Position of the first header equal to `name` after normalization
    pub fn header_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_token(name);
        self.headers.iter().position(|h| normalize_token(h) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::source::parse_csv;
    use contracts::shared::columns::ColumnRole;

    #[test]
    fn test_from_table() {
        let table = parse_csv(
            "VIN,Marca,Fecha de Arribo,Control 30 días realizado\n\
             A1,VW,01/01/2024,OK\n\
             A2,VW,no sabe,\n",
        )
        .unwrap();
        let snapshot = Snapshot::from_table(table);

        assert!(snapshot.load_error.is_none());
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.columns.tracked_intervals(), vec![30]);
        assert!(snapshot.columns.is_resolved(ColumnRole::ArrivalDate));
        assert!(snapshot.records[1].arrival_date.is_none());
        assert_eq!(snapshot.header_index("MARCA"), Some(1));
        assert_eq!(snapshot.header_index("MODELO"), None);
    }

    #[test]
    fn test_failed_snapshot_is_empty() {
        let snapshot = Snapshot::failed("timeout");
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.load_error.as_deref(), Some("timeout"));
        assert!(!snapshot.columns.is_resolved(ColumnRole::DeliveryDate));
    }
}
