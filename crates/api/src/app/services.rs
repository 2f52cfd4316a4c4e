use std::sync::Arc;

use stockroom_infra::{
    InMemoryInventoryStore, InventoryStore, PostgresInventoryStore, StorageConfig, StoreError,
};

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn InventoryStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryInventoryStore::new()))
    }

    pub fn store(&self) -> &dyn InventoryStore {
        self.store.as_ref()
    }
}

/// Wire the store selected by configuration.
pub async fn build_services(storage: &StorageConfig) -> Result<AppServices, StoreError> {
    match storage {
        StorageConfig::InMemory => {
            tracing::warn!("DATABASE_URL not set; using in-memory storage (data is lost on restart)");
            Ok(AppServices::in_memory())
        }
        StorageConfig::Postgres {
            url,
            max_connections,
        } => {
            let store = PostgresInventoryStore::connect(url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "connected to postgres");
            Ok(AppServices::new(Arc::new(store)))
        }
    }
}
