use contracts::dashboards::d403_admin_documents::{AdminDocumentsRequest, AdminDocumentsResponse};
use contracts::shared::columns::ColumnRole;
use contracts::shared::view::ViewState;

use crate::dashboards::table_layout::{
    count_by, precondition, state_for, status_key, TableLayout, ViewColumn,
};
use crate::domain::a001_vehicle::{Snapshot, VehicleRecord};
use crate::shared::columns::normalize::normalize_token;

const COLUMNS: &[ViewColumn] = &[
    ViewColumn::Role(ColumnRole::Vin, "VIN"),
    ViewColumn::Raw("CLIENTE"),
    ViewColumn::Raw("MARCA"),
    ViewColumn::Raw("MODELO"),
    ViewColumn::Role(ColumnRole::AdminStatus, "Admin status"),
    ViewColumn::Role(ColumnRole::InvoicingDate, "Invoiced"),
    ViewColumn::Role(ColumnRole::PaperworkDate, "Paperwork available"),
    ViewColumn::Role(ColumnRole::DeliveryDate, "Delivery date"),
];

fn is_pending_paperwork(record: &VehicleRecord) -> bool {
    record.invoicing_date.is_some() && record.paperwork_date.is_none()
}

/// Build the administrative documents view
pub fn build_admin_documents(
    snapshot: &Snapshot,
    request: &AdminDocumentsRequest,
) -> AdminDocumentsResponse {
    let mut response = AdminDocumentsResponse {
        state: ViewState::Ready,
        statuses: Vec::new(),
        invoiced_count: 0,
        paperwork_available_count: 0,
        pending_paperwork_count: 0,
        selected_status: None,
        pending_only: request.pending_only,
        columns: Vec::new(),
        rows: Vec::new(),
    };

    if let Some(state) = precondition(snapshot, ColumnRole::AdminStatus) {
        response.state = state;
        return response;
    }

    let records = &snapshot.records;
    let keys: Vec<String> = records
        .iter()
        .map(|r| status_key(r.admin_status.as_deref()))
        .collect();

    response.statuses = count_by(keys.iter().map(String::as_str));
    response.invoiced_count = records.iter().filter(|r| r.invoicing_date.is_some()).count();
    response.paperwork_available_count = records.iter().filter(|r| r.paperwork_date.is_some()).count();
    response.pending_paperwork_count = records.iter().filter(|r| is_pending_paperwork(r)).count();

    let selected = request
        .admin_status
        .as_deref()
        .map(normalize_token)
        .filter(|s| !s.is_empty());

    let mut rows: Vec<&VehicleRecord> = records
        .iter()
        .zip(&keys)
        .filter(|(_, key)| selected.as_ref().map_or(true, |s| *key == s))
        .filter(|(r, _)| !request.pending_only || is_pending_paperwork(r))
        .map(|(r, _)| r)
        .collect();
    rows.sort_by(|a, b| {
        (a.invoicing_date.is_none(), a.invoicing_date, &a.vin)
            .cmp(&(b.invoicing_date.is_none(), b.invoicing_date, &b.vin))
    });

    let layout = TableLayout::bind(snapshot, COLUMNS);
    response.columns = layout.columns();
    response.rows = rows.into_iter().map(|r| layout.row(r, None)).collect();
    response.selected_status = selected;
    response.state = state_for(&response.rows);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::source::parse_csv;

    const CSV: &str = "\
VIN,ESTADO ADMIN,FECHA FACTURACIÓN,FECHA DISPONIBILIDAD DOCUMENTACIÓN
A1,Facturado,10/01/2024,15/01/2024
A2,Facturado,05/01/2024,
A3,Pendiente de pago,,
A4,facturado,no aplica,
";

    fn snapshot() -> Snapshot {
        Snapshot::from_table(parse_csv(CSV).unwrap())
    }

    fn vins(response: &AdminDocumentsResponse) -> Vec<&str> {
        response.rows.iter().filter_map(|r| r.vin.as_deref()).collect()
    }

    #[test]
    fn test_counts() {
        let response = build_admin_documents(&snapshot(), &AdminDocumentsRequest::default());
        assert_eq!(response.statuses[0].status, "FACTURADO");
        assert_eq!(response.statuses[0].count, 3);
        assert_eq!(response.invoiced_count, 2);
        assert_eq!(response.paperwork_available_count, 1);
        assert_eq!(response.pending_paperwork_count, 1);
        // by invoicing date, undated last
        assert_eq!(vins(&response), vec!["A2", "A1", "A3", "A4"]);
    }

    #[test]
    fn test_filters() {
        let request = AdminDocumentsRequest {
            admin_status: Some("FACTURADO".to_string()),
            pending_only: false,
        };
        assert_eq!(
            vins(&build_admin_documents(&snapshot(), &request)),
            vec!["A2", "A1", "A4"]
        );

        let request = AdminDocumentsRequest {
            admin_status: None,
            pending_only: true,
        };
        let response = build_admin_documents(&snapshot(), &request);
        assert_eq!(vins(&response), vec!["A2"]);
        assert!(response.pending_only);
    }

    #[test]
    fn test_missing_document_dates_degrade_to_zero() {
        let s = Snapshot::from_table(parse_csv("VIN,ESTADO ADMIN\nA1,Facturado\n").unwrap());
        let response = build_admin_documents(&s, &AdminDocumentsRequest::default());
        assert_eq!(response.state, ViewState::Ready);
        assert_eq!(response.invoiced_count, 0);
        let keys: Vec<&str> = response.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["vin", "admin_status"]);
    }

    #[test]
    fn test_unavailable_without_admin_status() {
        let s = Snapshot::from_table(parse_csv("VIN\nA1\n").unwrap());
        let response = build_admin_documents(&s, &AdminDocumentsRequest::default());
        assert_eq!(
            response.state,
            ViewState::Unavailable {
                role: ColumnRole::AdminStatus
            }
        );
    }
}
