use std::path::PathBuf;
use std::sync::Arc;

use models::{Product, ProductId, ProductInput, Summary};
use tracing::{debug, error, info, warn};

use crate::errors::ServiceError;
use crate::inventory::gateway::{JsonProductGateway, ProductGateway};
use crate::inventory::worker::{spawn_worker, WorkerHandle};
use crate::metrics;
use crate::storage::LoadState;

/// Case-insensitive substring match on name or category, in list order.
pub fn search_products(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    products.iter().filter(|p| p.matches(&needle)).cloned().collect()
}

/// The authoritative product list.
///
/// The store is the single owner of the live list and is mutated through
/// `&mut self` only. Every successful mutation is applied in memory first,
/// then a snapshot is handed to the persistence worker and the save is
/// awaited. If that save fails the change stays in memory and the error is
/// returned; `save_all` can be used to retry.
pub struct InventoryStore {
    products: Vec<Product>,
    worker: WorkerHandle,
    load_state: LoadState,
}

impl InventoryStore {
    /// Load the persisted list through `gateway` and take ownership of it.
    pub async fn open(gateway: Arc<dyn ProductGateway>) -> Result<Self, ServiceError> {
        let worker = spawn_worker(gateway);
        let loaded = worker.load().await?;
        match &loaded.state {
            LoadState::Recovered { reason } => {
                metrics::DEGRADED_LOADS_TOTAL.inc();
                warn!(%reason, "inventory recovered from an unusable data file; next save overwrites it");
            }
            LoadState::Missing => info!("no inventory on disk yet; starting empty"),
            LoadState::Loaded => info!(count = loaded.items.len(), "inventory loaded"),
        }
        Ok(Self { products: loaded.items, worker, load_state: loaded.state })
    }

    /// Open a store mirrored to the JSON file at `path`.
    pub async fn open_json<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Self::open(Arc::new(JsonProductGateway::new(path))).await
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// True when startup discarded an unreadable data file.
    pub fn is_degraded(&self) -> bool {
        matches!(self.load_state, LoadState::Recovered { .. })
    }

    /// The full list in current order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Point-in-time copy of the list, decoupled from later mutations.
    pub fn snapshot(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.products)
    }

    pub fn search(&self, term: &str) -> Vec<Product> {
        let found = search_products(&self.products, term);
        debug!(term, hits = found.len(), "search");
        found
    }

    /// Same result as `search`, computed by the worker on a snapshot.
    pub async fn search_in_background(&self, term: &str) -> Result<Vec<Product>, ServiceError> {
        let found = self.worker.search(self.snapshot(), term).await?;
        debug!(term, hits = found.len(), "background search");
        Ok(found)
    }

    /// Append a new product. Fails with `DuplicateId` when the id is taken.
    pub async fn add(&mut self, input: ProductInput) -> Result<Product, ServiceError> {
        let product = input.into_product().map_err(|e| reject(e.into()))?;
        if self.position(product.id).is_some() {
            return Err(reject(ServiceError::DuplicateId(product.id)));
        }
        self.products.push(product.clone());
        metrics::record_mutation("add");
        info!(id = product.id, name = %product.name, "product added");
        self.persist().await?;
        Ok(product)
    }

    /// Replace every field of product `id` in place, possibly changing its id.
    pub async fn update(&mut self, id: ProductId, input: ProductInput) -> Result<Product, ServiceError> {
        let product = input.into_product().map_err(|e| reject(e.into()))?;
        let idx = self.position(id).ok_or_else(|| reject(ServiceError::NotFound(id)))?;
        if product.id != id && self.position(product.id).is_some() {
            return Err(reject(ServiceError::DuplicateId(product.id)));
        }
        self.products[idx] = product.clone();
        metrics::record_mutation("update");
        info!(id, new_id = product.id, "product updated");
        self.persist().await?;
        Ok(product)
    }

    /// Remove product `id`, keeping the order of the rest.
    pub async fn delete(&mut self, id: ProductId) -> Result<Product, ServiceError> {
        let idx = self.position(id).ok_or_else(|| reject(ServiceError::NotFound(id)))?;
        let removed = self.products.remove(idx);
        metrics::record_mutation("delete");
        info!(id, name = %removed.name, "product deleted");
        self.persist().await?;
        Ok(removed)
    }

    /// Persist the current list again, e.g. after a failed save.
    pub async fn save_all(&self) -> Result<(), ServiceError> {
        self.persist().await
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        if let Err(e) = self.worker.save(self.snapshot()).await {
            metrics::SAVE_FAILURES_TOTAL.inc();
            error!(error = %e, "save failed; in-memory inventory is ahead of disk");
            return Err(e.into());
        }
        Ok(())
    }
}

fn reject(err: ServiceError) -> ServiceError {
    metrics::record_rejection(err.reason());
    debug!(error = %err, "mutation rejected");
    err
}
