//! Line-oriented front end for the inventory.
//!
//! Parses commands typed on stdin, calls into `service::InventoryStore` and
//! renders its results. Holds no inventory state of its own.

pub mod commands;
pub mod render;
pub mod session;
pub mod startup;

pub use startup::run;
