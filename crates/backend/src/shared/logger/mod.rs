pub mod repository;

use repository::push_entry;

/// Логирование события на сервере: в tracing и в журнал `/api/logs`
///
/// ```ignore
/// logger::log("source", "Loaded 120 rows");
/// ```
pub fn log(category: &str, message: &str) {
    tracing::info!(target: "events", category, "{}", message);
    push_entry("info", category, message);
}

pub fn warn(category: &str, message: &str) {
    tracing::warn!(target: "events", category, "{}", message);
    push_entry("warn", category, message);
}

pub fn error(category: &str, message: &str) {
    tracing::error!(target: "events", category, "{}", message);
    push_entry("error", category, message);
}
