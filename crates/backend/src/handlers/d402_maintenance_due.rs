use axum::{extract::Query, Json};
use chrono::Local;
use contracts::dashboards::d402_maintenance_due::{MaintenanceDueRequest, MaintenanceDueResponse};

use crate::dashboards::d402_maintenance_due::service;
use crate::domain::a001_vehicle::service as vehicles;

/// GET /api/d402/maintenance_due?today=2025-03-14
pub async fn get_maintenance_due(
    Query(request): Query<MaintenanceDueRequest>,
) -> Json<MaintenanceDueResponse> {
    let snapshot = vehicles::current_snapshot().await;
    let reference = request.today.unwrap_or_else(|| Local::now().date_naive());

    let response = service::build_maintenance_due(&snapshot, reference);
    tracing::info!(
        "D402 Dashboard: {} due today, {} this week, {} overdue",
        response.due_today.len(),
        response.due_this_week.len(),
        response.overdue.len()
    );
    Json(response)
}
