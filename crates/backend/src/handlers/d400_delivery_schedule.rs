use axum::{extract::Query, Json};
use chrono::Local;
use contracts::dashboards::d400_delivery_schedule::{
    DeliveryScheduleRequest, DeliveryScheduleResponse,
};

use crate::dashboards::d400_delivery_schedule::service;
use crate::domain::a001_vehicle::service as vehicles;

/// GET /api/d400/delivery_schedule?year=2025&mode=month&month=3&day=2025-03-14
pub async fn get_delivery_schedule(
    Query(request): Query<DeliveryScheduleRequest>,
) -> Json<DeliveryScheduleResponse> {
    let snapshot = vehicles::current_snapshot().await;
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    let response = service::build_delivery_schedule(&snapshot, &request, today);
    tracing::info!(
        "D400 Dashboard: {:?} {:?} -> {} rows ({:?})",
        response.mode,
        response.selected_year,
        response.rows.len(),
        response.state
    );
    Json(response)
}
