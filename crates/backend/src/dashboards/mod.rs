pub mod d400_delivery_schedule;
pub mod d401_stock_status;
pub mod d402_maintenance_due;
pub mod d403_admin_documents;
pub mod table_layout;
