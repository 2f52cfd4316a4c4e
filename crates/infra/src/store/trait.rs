use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{ItemId, LocationId};
use stockroom_inventory::{InventoryFilter, Item, ItemDraft, Location, LocationInventory, NewLocation};

/// Storage operation error.
///
/// These are **infrastructure outcomes** as opposed to input validation, which
/// happens in the domain crate before a store is ever called.
///
/// ## Error Categories
///
/// - **NotFound**: the targeted row does not exist
/// - **InvalidReference**: the write would break the location/item relationship
///   (item pointing at a missing location, deleting a location that still has items)
/// - **Unavailable**: the store could not execute the statement at all
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Relational store of locations and items.
///
/// ## Read Semantics
///
/// `resolve()` answers the inventory query: every location with the items that
/// satisfy the filter, ordered and included per `stockroom_inventory::finalize`.
/// It either returns the full result or an error, never a partial listing.
///
/// ## Write Semantics
///
/// Every write is a single statement against one row. Deleting a location that
/// still holds items is rejected with `InvalidReference` (restrict, not cascade).
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn resolve(&self, filter: &InventoryFilter) -> Result<Vec<LocationInventory>, StoreError>;

    /// All locations, ordered by name then id.
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError>;

    async fn create_location(&self, location: NewLocation) -> Result<Location, StoreError>;

    async fn rename_location(&self, id: LocationId, location: NewLocation) -> Result<Location, StoreError>;

    async fn delete_location(&self, id: LocationId) -> Result<(), StoreError>;

    async fn create_item(&self, draft: ItemDraft) -> Result<Item, StoreError>;

    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, StoreError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn resolve(&self, filter: &InventoryFilter) -> Result<Vec<LocationInventory>, StoreError> {
        (**self).resolve(filter).await
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        (**self).list_locations().await
    }

    async fn create_location(&self, location: NewLocation) -> Result<Location, StoreError> {
        (**self).create_location(location).await
    }

    async fn rename_location(&self, id: LocationId, location: NewLocation) -> Result<Location, StoreError> {
        (**self).rename_location(id, location).await
    }

    async fn delete_location(&self, id: LocationId) -> Result<(), StoreError> {
        (**self).delete_location(id).await
    }

    async fn create_item(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        (**self).create_item(draft).await
    }

    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, StoreError> {
        (**self).update_item(id, draft).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        (**self).delete_item(id).await
    }
}
