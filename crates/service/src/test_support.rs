#![cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use models::{Product, ProductInput};

use crate::errors::PersistenceError;
use crate::inventory::ProductGateway;
use crate::storage::Loaded;

pub fn product(id: i32, name: &str, category: &str) -> Product {
    ProductInput::new(id, name, Some(category), 10.0, 2)
        .into_product()
        .expect("valid test product")
}

/// Gateway keeping the last saved snapshot in memory.
#[derive(Default)]
pub struct MemoryGateway {
    initial: Mutex<Option<Loaded<Product>>>,
    saved: Mutex<Vec<Product>>,
    saves: AtomicUsize,
}

impl MemoryGateway {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self::with_loaded(Loaded::loaded(products))
    }

    pub fn with_loaded(loaded: Loaded<Product>) -> Self {
        Self { initial: Mutex::new(Some(loaded)), ..Self::default() }
    }

    pub fn saved(&self) -> Vec<Product> {
        self.saved.lock().expect("lock").clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductGateway for MemoryGateway {
    async fn load_all(&self) -> Loaded<Product> {
        self.initial.lock().expect("lock").take().unwrap_or_else(Loaded::missing)
    }

    async fn save_all(&self, snapshot: Vec<Product>) -> Result<(), PersistenceError> {
        *self.saved.lock().expect("lock") = snapshot;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Gateway whose saves always fail, as a full disk would.
pub struct FailingGateway;

#[async_trait]
impl ProductGateway for FailingGateway {
    async fn load_all(&self) -> Loaded<Product> {
        Loaded::missing()
    }

    async fn save_all(&self, _snapshot: Vec<Product>) -> Result<(), PersistenceError> {
        Err(PersistenceError::io(
            "products.json",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        ))
    }
}
