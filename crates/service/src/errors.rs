use std::path::PathBuf;

use models::{ModelError, ProductId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product id {0} already exists")]
    DuplicateId(ProductId),
    #[error("product id {0} not found")]
    NotFound(ProductId),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ServiceError {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "duplicate_id",
            Self::NotFound(_) => "not_found",
            Self::Model(_) => "validation",
            Self::Persistence(_) => "persistence",
        }
    }
}

/// A save that could not complete. Always surfaced to the caller.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("persistence worker is not running")]
    WorkerUnavailable,
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
