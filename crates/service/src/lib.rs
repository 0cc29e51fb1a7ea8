//! Service layer owning the inventory.
//! - `storage` persists ordered lists as JSON files.
//! - `inventory` holds the live collection, enforces its invariants and
//!   hands snapshots to a background persistence worker.
//! - `metrics` exposes Prometheus counters for store activity.

pub mod errors;
pub mod inventory;
pub mod metrics;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use errors::{PersistenceError, ServiceError};
pub use inventory::{InventoryStore, JsonProductGateway, ProductGateway};
pub use storage::{LoadState, Loaded};
