pub mod columns;
pub mod logger;
pub mod view;
