use chrono::Utc;
use contracts::shared::logger::LogEntry;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Сверх этого размера старые записи вытесняются
const MAX_ENTRIES: usize = 500;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static EVENT_LOG: Lazy<RwLock<VecDeque<LogEntry>>> =
    Lazy::new(|| RwLock::new(VecDeque::with_capacity(MAX_ENTRIES)));

/// Добавить запись в журнал
pub fn push_entry(level: &str, category: &str, message: &str) {
    let entry = LogEntry {
        id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        level: level.to_string(),
        category: category.to_string(),
        message: message.to_string(),
    };

    let Ok(mut log) = EVENT_LOG.write() else {
        eprintln!("Failed to log event: journal lock poisoned");
        return;
    };
    if log.len() == MAX_ENTRIES {
        log.pop_front();
    }
    log.push_back(entry);
}

/// Получить все записи журнала (новые сверху)
pub fn get_all_logs() -> Vec<LogEntry> {
    match EVENT_LOG.read() {
        Ok(log) => log.iter().rev().cloned().collect(),
        Err(_) => Vec::new(),
    }
}

/// Очистить журнал
pub fn clear_all_logs() {
    if let Ok(mut log) = EVENT_LOG.write() {
        log.clear();
    }
}
