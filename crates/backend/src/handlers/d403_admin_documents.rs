use axum::{extract::Query, Json};
use contracts::dashboards::d403_admin_documents::{AdminDocumentsRequest, AdminDocumentsResponse};

use crate::dashboards::d403_admin_documents::service;
use crate::domain::a001_vehicle::service as vehicles;

/// GET /api/d403/admin_documents?admin_status=facturado&pending_only=true
pub async fn get_admin_documents(
    Query(request): Query<AdminDocumentsRequest>,
) -> Json<AdminDocumentsResponse> {
    let snapshot = vehicles::current_snapshot().await;

    let response = service::build_admin_documents(&snapshot, &request);
    tracing::info!(
        "D403 Dashboard: {} rows, {} pending paperwork",
        response.rows.len(),
        response.pending_paperwork_count
    );
    Json(response)
}
