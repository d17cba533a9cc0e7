use axum::{extract::Query, Json};
use contracts::dashboards::d401_stock_status::{StockStatusRequest, StockStatusResponse};

use crate::dashboards::d401_stock_status::service;
use crate::domain::a001_vehicle::service as vehicles;

/// GET /api/d401/stock_status?status=bloqueado
pub async fn get_stock_status(
    Query(request): Query<StockStatusRequest>,
) -> Json<StockStatusResponse> {
    let snapshot = vehicles::current_snapshot().await;

    let response = service::build_stock_status(&snapshot, &request);
    tracing::info!(
        "D401 Dashboard: {} in stock, {} rows for {:?}",
        response.in_stock,
        response.rows.len(),
        response.selected_status
    );
    Json(response)
}
