//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so host crates can prepare the data
//! directory through `service::runtime::ensure_env` without depending on
//! `common` directly.

use std::path::Path;

/// Ensure the data file's directory exists before the store is opened.
pub async fn ensure_env(data_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(data_file).await
}
