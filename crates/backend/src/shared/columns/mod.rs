//! Column Resolver: locates the logical fields of the vehicle spreadsheet
//! inside its free-form, human-edited header row.

pub mod dates;
pub mod normalize;
pub mod resolver;

pub use resolver::{resolve, ColumnRef, ResolvedColumns};
