use axum::{http::StatusCode, Json};
use contracts::shared::logger::LogEntry;

use crate::shared::logger;

/// GET /api/logs
pub async fn list_all() -> Json<Vec<LogEntry>> {
    Json(logger::repository::get_all_logs())
}

/// DELETE /api/logs
pub async fn clear_all() -> StatusCode {
    logger::repository::clear_all_logs();
    StatusCode::OK
}
