//! Storage abstractions for the service layer
//!
//! Contains the file-backed list store the inventory persists through, and
//! the load result shared by every gateway.

pub mod json_list_store;

pub use json_list_store::JsonListStore;

/// How a load ended. Only `Recovered` means file content was discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// No file yet; first run.
    Missing,
    /// File read and accepted.
    Loaded,
    /// File unreadable or invalid; replaced by an empty collection.
    Recovered { reason: String },
}

/// Items produced by a load together with how the load went.
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub state: LoadState,
}

impl<T> Loaded<T> {
    pub fn missing() -> Self {
        Self { items: Vec::new(), state: LoadState::Missing }
    }

    pub fn loaded(items: Vec<T>) -> Self {
        Self { items, state: LoadState::Loaded }
    }

    pub fn recovered(reason: impl Into<String>) -> Self {
        Self { items: Vec::new(), state: LoadState::Recovered { reason: reason.into() } }
    }

    /// True when file content was thrown away during the load.
    pub fn is_degraded(&self) -> bool {
        matches!(self.state, LoadState::Recovered { .. })
    }
}
