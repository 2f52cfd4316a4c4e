//! Infrastructure layer: storage backends and process configuration.

pub mod config;
pub mod store;

pub use config::{Config, ConfigError, StorageConfig};
pub use store::{InMemoryInventoryStore, InventoryStore, PostgresInventoryStore, StoreError};
