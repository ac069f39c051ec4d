use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api::BackendOptions;
use crate::error::{ConfigError, StoreError};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};

pub const DEFAULT_TEACHER_IP_KEY: &str = "DZ-2134334";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File { dir: PathBuf },
    Sqlite { database_url: String },
}

impl StoreBackend {
    pub async fn open(&self) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        let store: Arc<dyn KeyValueStore> = match self {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File { dir } => Arc::new(FileStore::new(dir.clone())),
            StoreBackend::Sqlite { database_url } => Arc::new(SqliteStore::connect(database_url).await?),
        };
        Ok(store)
    }
}

/// Artificial delays standing in for network round trips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    pub auth: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Latency {
    pub fn disabled() -> Self {
        Self {
            auth: Duration::ZERO,
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            auth: Duration::from_millis(500),
            read: Duration::from_millis(300),
            write: Duration::from_millis(400),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DiaryConfig {
    pub store: StoreBackend,
    pub latency: Latency,
    pub teacher_ip_key: String,
}

impl DiaryConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        let store = match env::var("DIARY_STORE").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("file") => StoreBackend::File {
                dir: env::var("DIARY_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("diary-data")),
            },
            Ok("sqlite") | Err(_) => StoreBackend::Sqlite {
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://diary.db".to_string()),
            },
            Ok(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "DIARY_STORE",
                    value: other.to_string(),
                });
            }
        };

        let latency = match env::var("DIARY_SIMULATE_LATENCY") {
            Ok(value) => {
                if parse_bool("DIARY_SIMULATE_LATENCY", &value)? {
                    Latency::default()
                } else {
                    Latency::disabled()
                }
            }
            Err(_) => Latency::default(),
        };

        let teacher_ip_key = env::var("DIARY_TEACHER_IP_KEY")
            .unwrap_or_else(|_| DEFAULT_TEACHER_IP_KEY.to_string());

        Ok(Self {
            store,
            latency,
            teacher_ip_key,
        })
    }

    pub fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            latency: self.latency,
            teacher_ip_key: self.teacher_ip_key.clone(),
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
