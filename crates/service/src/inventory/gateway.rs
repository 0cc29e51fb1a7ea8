use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::Product;
use tracing::warn;

use crate::errors::PersistenceError;
use crate::storage::{JsonListStore, LoadState, Loaded};

/// Durable round-trip of the full product list.
/// Implementations hold no product state of their own.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Read every product. Never fails; see `LoadState` for how it went.
    async fn load_all(&self) -> Loaded<Product>;
    /// Replace the persisted list with `snapshot`.
    async fn save_all(&self, snapshot: Vec<Product>) -> Result<(), PersistenceError>;
}

/// Products mirrored to a single pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct JsonProductGateway {
    store: JsonListStore<Product>,
}

impl JsonProductGateway {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { store: JsonListStore::new(path) }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

#[async_trait]
impl ProductGateway for JsonProductGateway {
    async fn load_all(&self) -> Loaded<Product> {
        let loaded = self.store.load().await;
        if loaded.state != LoadState::Loaded {
            return loaded;
        }
        match check_collection(&loaded.items) {
            Ok(()) => loaded,
            Err(reason) => {
                warn!(path = %self.path().display(), %reason, "data file violates inventory rules; starting empty");
                Loaded::recovered(reason)
            }
        }
    }

    async fn save_all(&self, snapshot: Vec<Product>) -> Result<(), PersistenceError> {
        self.store.save(&snapshot).await
    }
}

/// A persisted list is only accepted whole: unique ids and valid records.
pub fn check_collection(products: &[Product]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(products.len());
    for p in products {
        if !seen.insert(p.id) {
            return Err(format!("duplicate id {}", p.id));
        }
        p.validate().map_err(|e| format!("record {}: {e}", p.id))?;
    }
    Ok(())
}
