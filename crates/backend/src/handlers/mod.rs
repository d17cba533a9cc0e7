// Dashboards (d400-d403)
pub mod d400_delivery_schedule;
pub mod d401_stock_status;
pub mod d402_maintenance_due;
pub mod d403_admin_documents;

// Source and system
pub mod logs;
pub mod source;
