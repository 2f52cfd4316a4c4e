use serde::Deserialize;

use stockroom_core::DomainResult;
use stockroom_inventory::{InventoryFilter, ItemDraft, NewLocation};

// -------------------------
// Request DTOs
// -------------------------

/// `GET /inventory` query parameters. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub category: Option<String>,
    pub location_id: Option<String>,
    pub name: Option<String>,
}

impl InventoryQuery {
    pub fn into_filter(self) -> DomainResult<InventoryFilter> {
        InventoryFilter::from_params(
            self.category.as_deref(),
            self.location_id.as_deref(),
            self.name.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub name: Option<String>,
}

impl LocationRequest {
    pub fn into_new_location(self) -> DomainResult<NewLocation> {
        NewLocation::parse(self.name.as_deref())
    }
}

/// Body of `POST /items` and `PUT /items/:id`.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub location_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub notes: Option<String>,
}

impl ItemRequest {
    pub fn into_draft(self) -> DomainResult<ItemDraft> {
        ItemDraft::parse(
            self.location_id.as_deref(),
            self.name.as_deref(),
            self.category.as_deref(),
            self.quantity,
            self.notes.as_deref(),
        )
    }
}
