use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use stockroom_core::{Entity, ItemId, LocationId};
use stockroom_inventory::{
    InventoryFilter, Item, ItemDraft, Location, LocationInventory, NewLocation, assemble,
};

use super::r#trait::{InventoryStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    locations: BTreeMap<LocationId, Location>,
    items: BTreeMap<ItemId, Item>,
    last_item_id: i64,
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Enforces the same referential rules as the Postgres
/// schema (items must reference an existing location, locations with items
/// cannot be deleted).
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

/// Insert or replace a row under its own id, returning the stored copy.
fn upsert<E: Entity + Clone>(table: &mut BTreeMap<E::Id, E>, row: E) -> E {
    table.insert(row.id(), row.clone());
    row
}

fn ensure_location(tables: &Tables, id: LocationId) -> Result<(), StoreError> {
    if tables.locations.contains_key(&id) {
        Ok(())
    } else {
        Err(StoreError::InvalidReference(format!("location {id} does not exist")))
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn resolve(&self, filter: &InventoryFilter) -> Result<Vec<LocationInventory>, StoreError> {
        let tables = self.read()?;
        let locations: Vec<Location> = tables.locations.values().cloned().collect();
        let items: Vec<Item> = tables.items.values().cloned().collect();
        Ok(assemble(&locations, &items, filter))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let tables = self.read()?;
        let mut locations: Vec<Location> = tables.locations.values().cloned().collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(locations)
    }

    async fn create_location(&self, location: NewLocation) -> Result<Location, StoreError> {
        let mut tables = self.write()?;
        Ok(upsert(&mut tables.locations, location.into_location(LocationId::new())))
    }

    async fn rename_location(&self, id: LocationId, location: NewLocation) -> Result<Location, StoreError> {
        let mut tables = self.write()?;
        let existing = tables.locations.get_mut(&id).ok_or(StoreError::NotFound)?;
        existing.name = location.name().to_string();
        Ok(existing.clone())
    }

    async fn delete_location(&self, id: LocationId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if !tables.locations.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.items.values().any(|item| item.location_id == id) {
            return Err(StoreError::InvalidReference(format!(
                "location {id} still holds items"
            )));
        }
        tables.locations.remove(&id);
        Ok(())
    }

    async fn create_item(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        let mut tables = self.write()?;
        ensure_location(&tables, draft.location_id)?;

        tables.last_item_id += 1;
        let id = ItemId::new(tables.last_item_id);
        Ok(upsert(&mut tables.items, draft.into_item(id)))
    }

    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, StoreError> {
        let mut tables = self.write()?;
        if !tables.items.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        ensure_location(&tables, draft.location_id)?;

        Ok(upsert(&mut tables.items, draft.into_item(id)))
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.items.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_location(name: &str) -> NewLocation {
        NewLocation::parse(Some(name)).unwrap()
    }

    fn draft(location: &Location, name: &str, category: &str, quantity: i64) -> ItemDraft {
        ItemDraft::parse(
            Some(location.id.to_string().as_str()),
            Some(name),
            Some(category),
            Some(quantity),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn resolve_scenario_with_empty_and_stocked_locations() {
        let store = InMemoryInventoryStore::new();
        let a = store.create_location(new_location("A")).await.unwrap();
        let b = store.create_location(new_location("B")).await.unwrap();
        let chair = store.create_item(draft(&b, "Chair", "Furniture", 3)).await.unwrap();

        let all = store.resolve(&InventoryFilter::unfiltered()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert!(all[0].items.is_empty());
        assert_eq!(all[1].items, vec![chair.summary()]);

        let electronic = InventoryFilter::new(Some("Electronic".into()), None, None);
        assert!(store.resolve(&electronic).await.unwrap().is_empty());

        let by_name = InventoryFilter::new(None, None, Some("chair".into()));
        let rows = store.resolve(&by_name).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, b.id);
    }

    #[tokio::test]
    async fn item_ids_are_assigned_in_order() {
        let store = InMemoryInventoryStore::new();
        let loc = store.create_location(new_location("Shelf")).await.unwrap();
        let first = store.create_item(draft(&loc, "Mug", "Other", 1)).await.unwrap();
        let second = store.create_item(draft(&loc, "Bowl", "Other", 1)).await.unwrap();
        assert_eq!(first.id, ItemId::new(1));
        assert_eq!(second.id, ItemId::new(2));
    }

    #[tokio::test]
    async fn create_item_requires_existing_location() {
        let store = InMemoryInventoryStore::new();
        let ghost = Location {
            id: LocationId::new(),
            name: "ghost".into(),
        };

        let err = store.create_item(draft(&ghost, "Mug", "Other", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
        assert!(store.resolve(&InventoryFilter::unfiltered()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_item_moves_between_locations() {
        let store = InMemoryInventoryStore::new();
        let office = store.create_location(new_location("Office")).await.unwrap();
        let garage = store.create_location(new_location("Garage")).await.unwrap();
        let lamp = store.create_item(draft(&office, "Lamp", "Furniture", 1)).await.unwrap();

        let moved = store
            .update_item(lamp.id, draft(&garage, "Lamp", "Furniture", 2))
            .await
            .unwrap();
        assert_eq!(moved.id, lamp.id);
        assert_eq!(moved.location_id, garage.id);

        let in_office = InventoryFilter::new(None, Some(office.id), None);
        assert!(store.resolve(&in_office).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let store = InMemoryInventoryStore::new();
        let loc = store.create_location(new_location("Shelf")).await.unwrap();
        let err = store
            .update_item(ItemId::new(99), draft(&loc, "Mug", "Other", 1))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn rename_location_keeps_id() {
        let store = InMemoryInventoryStore::new();
        let loc = store.create_location(new_location("Shed")).await.unwrap();
        let renamed = store.rename_location(loc.id, new_location("Workshop")).await.unwrap();
        assert_eq!(renamed.id, loc.id);
        assert_eq!(renamed.name, "Workshop");

        let err = store
            .rename_location(LocationId::new(), new_location("Nowhere"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn delete_location_restricts_when_items_remain() {
        let store = InMemoryInventoryStore::new();
        let loc = store.create_location(new_location("Attic")).await.unwrap();
        let item = store.create_item(draft(&loc, "Box", "Other", 4)).await.unwrap();

        let err = store.delete_location(loc.id).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));

        store.delete_item(item.id).await.unwrap();
        store.delete_location(loc.id).await.unwrap();
        assert!(store.list_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_absent_rows_is_not_found() {
        let store = InMemoryInventoryStore::new();
        assert_eq!(store.delete_location(LocationId::new()).await, Err(StoreError::NotFound));
        assert_eq!(store.delete_item(ItemId::new(1)).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn shared_store_behaves_like_the_inner_store() {
        let store: std::sync::Arc<dyn InventoryStore> = std::sync::Arc::new(InMemoryInventoryStore::new());
        let shared = store.clone();

        let loc = store.create_location(new_location("Pantry")).await.unwrap();
        shared.create_item(draft(&loc, "Rice", "Other", 2)).await.unwrap();

        let rows = shared.resolve(&InventoryFilter::unfiltered()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].items.len(), 1);
    }

    #[test]
    fn upsert_keys_rows_by_entity_id() {
        let mut table = BTreeMap::new();
        let shelf = NewLocation::parse(Some("Shelf")).unwrap().into_location(LocationId::new());
        upsert(&mut table, shelf.clone());

        let renamed = Location {
            name: "Top shelf".into(),
            ..shelf.clone()
        };
        upsert(&mut table, renamed);

        assert_eq!(table.len(), 1);
        assert_eq!(table[&shelf.id].name, "Top shelf");
    }

    #[tokio::test]
    async fn list_locations_is_sorted_by_name() {
        let store = InMemoryInventoryStore::new();
        for name in ["Garage", "Attic", "Basement"] {
            store.create_location(new_location(name)).await.unwrap();
        }
        let names: Vec<String> = store
            .list_locations()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Attic", "Basement", "Garage"]);
    }
}
