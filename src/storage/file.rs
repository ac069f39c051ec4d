//! # Filesystem-backed key-value store
//!
//! [`FileStore`] keeps one JSON document per key:
//!
//! ```text
//! <base_dir>/
//! ├── users.json
//! ├── notes.json
//! └── storageInitialized.json
//! ```
//!
//! Writes land in a sibling `.tmp` file first and are renamed into place, so a
//! reader never observes a half-written document.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::storage::KeyValueStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.entry_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.base).await?;
        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
