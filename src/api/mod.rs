//! In-process stand-in for the diary's server API.
//!
//! Every call sleeps for a configured latency, then works directly against
//! [`Storage`] by reading a whole collection, changing it and writing it back.

mod auth;
mod diary;

use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::{DEFAULT_TEACHER_IP_KEY, Latency};
use crate::storage::Storage;

pub use auth::MIN_PASSWORD_LEN;

#[derive(Clone, Debug)]
pub struct BackendOptions {
    pub latency: Latency,
    pub teacher_ip_key: String,
}

impl BackendOptions {
    /// No artificial delay; used by tests and tools.
    pub fn instant() -> Self {
        Self {
            latency: Latency::disabled(),
            ..Self::default()
        }
    }
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            latency: Latency::default(),
            teacher_ip_key: DEFAULT_TEACHER_IP_KEY.to_string(),
        }
    }
}

pub struct MockBackend {
    storage: Storage,
    options: BackendOptions,
    // Serializes read-modify-write cycles issued through this instance.
    write_lock: Mutex<()>,
}

impl MockBackend {
    pub fn new(storage: Storage, options: BackendOptions) -> Self {
        Self {
            storage,
            options,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn options(&self) -> &BackendOptions {
        &self.options
    }

    async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
