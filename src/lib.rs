pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use api::{BackendOptions, MockBackend};
pub use config::DiaryConfig;
pub use error::{ApiError, StoreError};
pub use state::Session;
pub use storage::{KeyValueStore, Storage, StoreKey};
