use axum::Json;
use contracts::shared::columns::ColumnsInfoResponse;

use crate::domain::a001_vehicle::{service as vehicles, Snapshot};

fn columns_info(snapshot: &Snapshot) -> ColumnsInfoResponse {
    ColumnsInfoResponse {
        roles: snapshot.columns.role_names(),
        tracked_intervals: snapshot.columns.tracked_intervals(),
        headers: snapshot.headers.clone(),
        row_count: snapshot.records.len(),
        loaded_at: snapshot.loaded_at,
        load_error: snapshot.load_error.clone(),
    }
}

/// GET /api/columns
pub async fn get_columns() -> Json<ColumnsInfoResponse> {
    let snapshot = vehicles::current_snapshot().await;
    Json(columns_info(&snapshot))
}

/// POST /api/source/reload
pub async fn reload() -> Json<ColumnsInfoResponse> {
    tracing::info!("Source reload requested");
    let snapshot = vehicles::reload().await;
    Json(columns_info(&snapshot))
}
