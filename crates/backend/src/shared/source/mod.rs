//! Acquisition of the vehicle spreadsheet (published CSV export).

pub mod client;
pub mod error;
pub mod table;

pub use client::{source_from_config, CsvSource};
pub use error::SourceError;
pub use table::{parse_csv, RawTable};
