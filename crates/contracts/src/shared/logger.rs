use serde::{Deserialize, Serialize};

/// Запись журнала событий сервера
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: String,
    pub level: String, // "info" | "warn" | "error"
    pub category: String,
    pub message: String,
}
