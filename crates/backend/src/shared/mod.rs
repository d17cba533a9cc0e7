pub mod columns;
pub mod config;
pub mod format;
pub mod logger;
pub mod source;
