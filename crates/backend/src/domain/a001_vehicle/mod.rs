pub mod model;
pub mod repository;
pub mod service;
pub mod snapshot;

pub use model::{VehicleRecord, SERVICE_INTERVALS};
pub use snapshot::Snapshot;
