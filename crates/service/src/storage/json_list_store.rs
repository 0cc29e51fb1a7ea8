use std::{io::ErrorKind, marker::PhantomData, path::{Path, PathBuf}};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::PersistenceError;
use crate::storage::Loaded;

/// Generic JSON file-backed ordered list.
///
/// Holds nothing but the file path: every `load` reads the whole file and
/// every `save` rewrites it. Order of the list is preserved on disk.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonListStore<T> {
    fn clone(&self) -> Self {
        Self { file_path: self.file_path.clone(), _marker: PhantomData }
    }
}

impl<T> std::fmt::Debug for JsonListStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonListStore").field("file_path", &self.file_path).finish()
    }
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Sibling file a save writes before renaming: the full file name plus `.tmp`.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    /// Read the whole list. Never fails: a missing file is a first run and an
    /// unreadable or malformed file degrades to an empty list.
    pub async fn load(&self) -> Loaded<T> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "no data file yet");
                return Loaded::missing();
            }
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "data file unreadable; starting empty");
                return Loaded::recovered(format!("read failed: {e}"));
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Loaded::loaded(Vec::new());
        }
        // `null` is accepted as an empty list
        match serde_json::from_slice::<Option<Vec<T>>>(&bytes) {
            Ok(items) => Loaded::loaded(items.unwrap_or_default()),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "data file corrupt; starting empty");
                Loaded::recovered(format!("parse failed: {e}"))
            }
        }
    }

    /// Overwrite the file with `items`.
    ///
    /// Writes a sibling `.tmp` file first and renames it over the target so a
    /// crash mid-write never leaves a truncated data file behind.
    pub async fn save(&self, items: &[T]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| PersistenceError::io(parent, e))?;
        }
        let data = serde_json::to_vec_pretty(items)?;
        let tmp_path = self.staging_path();
        fs::write(&tmp_path, data).await.map_err(|e| PersistenceError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.file_path)
            .await
            .map_err(|e| PersistenceError::io(&self.file_path, e))?;
        Ok(())
    }
}
