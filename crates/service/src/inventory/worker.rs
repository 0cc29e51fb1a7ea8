//! Background worker for load, save and search.
//!
//! The worker owns the gateway and receives jobs over a bounded channel. It
//! runs them strictly one after another, so a save can never overlap another
//! save or a load. Jobs carry snapshots by value; the worker never sees the
//! owner's live list.

use std::sync::Arc;

use models::Product;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::errors::PersistenceError;
use crate::inventory::gateway::ProductGateway;
use crate::inventory::store::search_products;
use crate::metrics;
use crate::storage::Loaded;

enum Job {
    Load {
        reply: oneshot::Sender<Loaded<Product>>,
    },
    Save {
        snapshot: Vec<Product>,
        reply: oneshot::Sender<Result<(), PersistenceError>>,
    },
    Search {
        snapshot: Vec<Product>,
        term: String,
        reply: oneshot::Sender<Vec<Product>>,
    },
}

/// Sending side of the worker. Cheap to clone; the worker stops once every
/// handle is dropped.
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Job>,
}

/// Start the worker on the current tokio runtime.
pub fn spawn_worker(gateway: Arc<dyn ProductGateway>) -> WorkerHandle {
    let (tx, mut rx) = mpsc::channel::<Job>(1);
    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            run_job(gateway.as_ref(), job).await;
        }
        debug!("persistence worker stopped");
    });
    WorkerHandle { tx }
}

async fn run_job(gateway: &dyn ProductGateway, job: Job) {
    match job {
        Job::Load { reply } => {
            let loaded = gateway.load_all().await;
            let _ = reply.send(loaded);
        }
        Job::Save { snapshot, reply } => {
            let count = snapshot.len();
            let timer = metrics::SAVE_DURATION.start_timer();
            let result = gateway.save_all(snapshot).await;
            timer.observe_duration();
            match &result {
                Ok(()) => debug!(count, "snapshot saved"),
                Err(e) => error!(count, error = %e, "snapshot save failed"),
            }
            let _ = reply.send(result);
        }
        Job::Search { snapshot, term, reply } => {
            let _ = reply.send(search_products(&snapshot, &term));
        }
    }
}

impl WorkerHandle {
    async fn dispatch<R>(&self, job: Job, rx: oneshot::Receiver<R>) -> Result<R, PersistenceError> {
        self.tx.send(job).await.map_err(|_| PersistenceError::WorkerUnavailable)?;
        rx.await.map_err(|_| PersistenceError::WorkerUnavailable)
    }

    pub async fn load(&self) -> Result<Loaded<Product>, PersistenceError> {
        let (reply, rx) = oneshot::channel();
        self.dispatch(Job::Load { reply }, rx).await
    }

    pub async fn save(&self, snapshot: Vec<Product>) -> Result<(), PersistenceError> {
        let (reply, rx) = oneshot::channel();
        self.dispatch(Job::Save { snapshot, reply }, rx).await?
    }

    pub async fn search(&self, snapshot: Vec<Product>, term: &str) -> Result<Vec<Product>, PersistenceError> {
        let (reply, rx) = oneshot::channel();
        let job = Job::Search { snapshot, term: term.to_string(), reply };
        self.dispatch(job, rx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, FailingGateway, MemoryGateway};

    #[tokio::test]
    async fn save_hands_the_snapshot_to_the_gateway() -> Result<(), anyhow::Error> {
        let gateway = Arc::new(MemoryGateway::default());
        let worker = spawn_worker(gateway.clone());
        worker.save(vec![product(1, "Mouse", "Electronics")]).await?;
        assert_eq!(gateway.saved().len(), 1);
        assert_eq!(gateway.save_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn later_changes_to_the_source_do_not_reach_a_dispatched_snapshot() -> Result<(), anyhow::Error> {
        let gateway = Arc::new(MemoryGateway::default());
        let worker = spawn_worker(gateway.clone());
        let mut live = vec![product(1, "Mouse", "Electronics")];
        let snapshot = live.clone();
        live.push(product(2, "Rice", "Grocery"));
        worker.save(snapshot).await?;
        assert_eq!(gateway.saved().len(), 1);
        assert_eq!(live.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn failed_save_is_reported() {
        let worker = spawn_worker(Arc::new(FailingGateway));
        let err = worker.save(Vec::new()).await.expect_err("must fail");
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    #[tokio::test]
    async fn search_runs_on_the_snapshot() -> Result<(), anyhow::Error> {
        let worker = spawn_worker(Arc::new(MemoryGateway::default()));
        let snapshot = vec![product(1, "Mouse", "Electronics"), product(2, "Rice", "Grocery")];
        let found = worker.search(snapshot, "RICE").await?;
        assert_eq!(found.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
        Ok(())
    }

    #[tokio::test]
    async fn load_returns_gateway_contents() -> Result<(), anyhow::Error> {
        let gateway = Arc::new(MemoryGateway::with_products(vec![product(3, "Pen", "Stationery")]));
        let worker = spawn_worker(gateway);
        let loaded = worker.load().await?;
        assert_eq!(loaded.items.len(), 1);
        Ok(())
    }
}
