use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SOURCE
        // ========================================
        .route("/api/columns", get(handlers::source::get_columns))
        .route("/api/source/reload", post(handlers::source::reload))
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d400/delivery_schedule",
            get(handlers::d400_delivery_schedule::get_delivery_schedule),
        )
        .route(
            "/api/d401/stock_status",
            get(handlers::d401_stock_status::get_stock_status),
        )
        .route(
            "/api/d402/maintenance_due",
            get(handlers::d402_maintenance_due::get_maintenance_due),
        )
        .route(
            "/api/d403/admin_documents",
            get(handlers::d403_admin_documents::get_admin_documents),
        )
        // ========================================
        // LOGS
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all).delete(handlers::logs::clear_all),
        )
}
