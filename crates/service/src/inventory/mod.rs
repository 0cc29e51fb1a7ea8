//! The inventory: one owner of the live product list, a gateway that mirrors
//! it to disk, and a worker that runs gateway calls off the owner's task.

pub mod gateway;
pub mod store;
pub mod worker;

pub use gateway::{JsonProductGateway, ProductGateway};
pub use store::{search_products, InventoryStore};
pub use worker::{spawn_worker, WorkerHandle};
