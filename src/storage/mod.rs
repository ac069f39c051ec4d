//! Key-value persistence for the diary.
//!
//! Every collection lives under a fixed [`StoreKey`] as one JSON document.
//! [`KeyValueStore`] is the raw string-in, string-out seam that backends
//! implement; [`Storage`] layers typed JSON access on top of it.

mod file;
mod memory;
mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn write(&self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Users,
    Subjects,
    Homeworks,
    Notes,
    Messages,
    Settings,
    StorageInitialized,
}

impl StoreKey {
    pub const ALL: [StoreKey; 7] = [
        StoreKey::Users,
        StoreKey::Subjects,
        StoreKey::Homeworks,
        StoreKey::Notes,
        StoreKey::Messages,
        StoreKey::Settings,
        StoreKey::StorageInitialized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Users => "users",
            StoreKey::Subjects => "subjects",
            StoreKey::Homeworks => "homeworks",
            StoreKey::Notes => "notes",
            StoreKey::Messages => "messages",
            StoreKey::Settings => "settings",
            StoreKey::StorageInitialized => "storageInitialized",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed JSON access over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Returns the value stored under `key`, or `default` when it is missing,
    /// unreadable or not valid JSON for `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        match self.try_get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                error!("Error getting item \"{}\" from storage: {}", key, e);
                default
            }
        }
    }

    pub async fn try_get<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        match self.store.read(key.as_str()).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let result = match serde_json::to_string(value) {
            Ok(raw) => self.store.write(key.as_str(), raw).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = &result {
            error!("Error setting item \"{}\" in storage: {}", key, e);
        }
        result
    }

    /// Raw JSON for every known key, in [`StoreKey::ALL`] order.
    pub async fn snapshot(&self) -> Result<Vec<(StoreKey, Option<String>)>, StoreError> {
        let mut entries = Vec::with_capacity(StoreKey::ALL.len());
        for key in StoreKey::ALL {
            entries.push((key, self.store.read(key.as_str()).await?));
        }
        Ok(entries)
    }
}
