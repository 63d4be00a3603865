//! Durable storage for the configuration tree.

mod backend;
mod config_store;
mod error;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use config_store::{ConfigStore, LoadOutcome, LoadSource, WriteStatus, DEFAULT_STORAGE_KEY};
pub use error::StoreError;
