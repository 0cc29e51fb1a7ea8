//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the inventory file is opened.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the directory holding the data file exists.
///
/// A missing data file is fine (first run); a data path that points at a
/// directory is reported so the operator sees it before the first save fails.
pub async fn ensure_env(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    match tokio::fs::metadata(data_file).await {
        Ok(meta) if meta.is_dir() => {
            warn!(path = %data_file.display(), "data path is a directory; saves will fail");
        }
        Ok(_) => debug!(path = %data_file.display(), "data file present"),
        Err(_) => debug!(path = %data_file.display(), "data file not found; starting empty"),
    }
    Ok(())
}
