use contracts::shared::columns::ColumnRole;
use contracts::shared::view::{ColumnDef, StatusCount, VehicleRow, ViewState};
use std::collections::{BTreeMap, HashMap};

use crate::domain::a001_vehicle::{Snapshot, VehicleRecord};
use crate::shared::columns::normalize::normalize_token;
use crate::shared::format::format_date_iso;

/// Category shown for records with an empty status cell
pub const NO_STATUS: &str = "SIN ESTADO";

/// Column requested by a view
#[derive(Debug, Clone, Copy)]
pub enum ViewColumn {
    /// Resolved role; skipped when the role did not resolve
    Role(ColumnRole, &'static str),
    /// Raw header by name; skipped when the table has no such header
    Raw(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum CellSource {
    Role(ColumnRole),
    Cell(usize),
}

/// Columns of a view bound to the current snapshot
pub struct TableLayout {
    columns: Vec<(ColumnDef, CellSource)>,
}

impl TableLayout {
    pub fn bind(snapshot: &Snapshot, requested: &[ViewColumn]) -> Self {
        let columns = requested
            .iter()
            .filter_map(|column| match *column {
                ViewColumn::Role(role, title) => snapshot
                    .columns
                    .is_resolved(role)
                    .then(|| (ColumnDef::new(role.as_str(), title), CellSource::Role(role))),
                ViewColumn::Raw(header) => snapshot
                    .header_index(header)
                    .map(|i| (ColumnDef::new(header, header), CellSource::Cell(i))),
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> Vec<ColumnDef> {
        self.columns.iter().map(|(def, _)| def.clone()).collect()
    }

    pub fn row(&self, record: &VehicleRecord, label: Option<String>) -> VehicleRow {
        let values: HashMap<String, String> = self
            .columns
            .iter()
            .filter_map(|(def, source)| {
                let value = match *source {
                    CellSource::Cell(i) => record.cell(i).map(str::to_string),
                    CellSource::Role(role) => role_value(record, role),
                };
                value.map(|v| (def.key.clone(), v))
            })
            .collect();

        VehicleRow {
            vin: record.vin.clone(),
            values,
            label,
        }
    }
}

/// Display value of a role: parsed dates in ISO form, cleaned contact data,
/// raw text otherwise
fn role_value(record: &VehicleRecord, role: ColumnRole) -> Option<String> {
    match role {
        ColumnRole::DeliveryDate => record.delivery_date.map(format_date_iso),
        ColumnRole::ArrivalDate => record.arrival_date.map(format_date_iso),
        ColumnRole::InvoicingDate => record.invoicing_date.map(format_date_iso),
        ColumnRole::PaperworkDate => record.paperwork_date.map(format_date_iso),
        ColumnRole::Phone => record.phone_clean.clone(),
        ColumnRole::Email => record.email_clean.clone(),
        ColumnRole::AdminStatus => record.admin_status.clone(),
        ColumnRole::LifecycleStatus => record.lifecycle_status.clone(),
        ColumnRole::Vin => record.vin.clone(),
    }
}

/// Normalized category key of a free-text status cell
pub fn status_key(value: Option<&str>) -> String {
    match value.map(normalize_token) {
        Some(key) if !key.is_empty() => key,
        _ => NO_STATUS.to_string(),
    }
}

/// Counts per category, largest first, ties by name
pub fn count_by<'a, I>(keys: I) -> Vec<StatusCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut result: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    result
}

/// State shared by every view before filtering: failed load first, then a
/// required role that did not resolve
pub fn precondition(snapshot: &Snapshot, required: ColumnRole) -> Option<ViewState> {
    if let Some(message) = &snapshot.load_error {
        return Some(ViewState::LoadFailed {
            message: message.clone(),
        });
    }
    if !snapshot.columns.is_resolved(required) {
        return Some(ViewState::Unavailable { role: required });
    }
    None
}

pub fn state_for<T>(rows: &[T]) -> ViewState {
    if rows.is_empty() {
        ViewState::NoMatches
    } else {
        ViewState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::source::parse_csv;

    fn snapshot(csv: &str) -> Snapshot {
        Snapshot::from_table(parse_csv(csv).unwrap())
    }

    #[test]
    fn test_layout_skips_missing_columns() {
        let s = snapshot("VIN,MARCA,TELEFONO\nA1,VW,351-555\n");
        let layout = TableLayout::bind(
            &s,
            &[
                ViewColumn::Role(ColumnRole::Vin, "VIN"),
                ViewColumn::Raw("MARCA"),
                ViewColumn::Raw("MODELO"),
                ViewColumn::Role(ColumnRole::Phone, "Phone"),
                ViewColumn::Role(ColumnRole::Email, "Email"),
            ],
        );
        let keys: Vec<String> = layout.columns().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["vin", "MARCA", "phone"]);

        let row = layout.row(&s.records[0], None);
        assert_eq!(row.values.get("MARCA").map(String::as_str), Some("VW"));
        assert_eq!(row.values.get("phone").map(String::as_str), Some("351555"));
        assert_eq!(row.vin.as_deref(), Some("A1"));
    }

    #[test]
    fn test_count_by_orders_by_count_then_name() {
        let counts = count_by(["B", "A", "B", "C", "A", "B"]);
        let flat: Vec<(&str, usize)> = counts.iter().map(|c| (c.status.as_str(), c.count)).collect();
        assert_eq!(flat, vec![("B", 3), ("A", 2), ("C", 1)]);
    }

    #[test]
    fn test_status_key() {
        assert_eq!(status_key(Some(" en exhibición ")), "EN EXHIBICION");
        assert_eq!(status_key(Some("  ")), NO_STATUS);
        assert_eq!(status_key(None), NO_STATUS);
    }

    #[test]
    fn test_precondition_prefers_load_failure() {
        let failed = Snapshot::failed("boom");
        assert_eq!(
            precondition(&failed, ColumnRole::DeliveryDate),
            Some(ViewState::LoadFailed {
                message: "boom".to_string()
            })
        );
        let s = snapshot("VIN\nA1\n");
        assert_eq!(
            precondition(&s, ColumnRole::DeliveryDate),
            Some(ViewState::Unavailable {
                role: ColumnRole::DeliveryDate
            })
        );
        assert_eq!(precondition(&s, ColumnRole::Vin), None);
    }
}
