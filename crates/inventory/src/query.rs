//! Inventory query decision logic.
//!
//! Which items survive a filter, which locations are shown, and in what order.
//! Storage backends do the join and aggregation however suits them, then hand
//! their rows to [`finalize`] so ordering and inclusion are decided in one place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockroom_core::LocationId;

use crate::filter::InventoryFilter;
use crate::item::{Item, ItemSummary};
use crate::location::Location;

/// One location with the items it holds that satisfy the active filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInventory {
    pub id: LocationId,
    pub name: String,
    pub items: Vec<ItemSummary>,
}

/// Rule deciding whether a location with `n` surviving items is listed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InclusionRule {
    /// No predicate is active: every location is listed, empty ones included.
    KeepEmpty,
    /// At least one predicate is active: only locations with a surviving item.
    RequireMatch,
}

impl InclusionRule {
    pub fn for_filter(filter: &InventoryFilter) -> Self {
        if filter.is_empty() {
            InclusionRule::KeepEmpty
        } else {
            InclusionRule::RequireMatch
        }
    }

    pub fn admits(&self, surviving_items: usize) -> bool {
        match self {
            InclusionRule::KeepEmpty => true,
            InclusionRule::RequireMatch => surviving_items > 0,
        }
    }
}

/// Evaluate a filter over a full snapshot of locations and items.
///
/// Behaves as a left outer join from locations to items: items whose location is
/// not in `locations` are ignored.
pub fn assemble(locations: &[Location], items: &[Item], filter: &InventoryFilter) -> Vec<LocationInventory> {
    let predicates = filter.predicates();

    let mut by_location: HashMap<LocationId, Vec<ItemSummary>> = HashMap::new();
    for item in items {
        if predicates.iter().all(|p| p.matches(item)) {
            by_location.entry(item.location_id).or_default().push(item.summary());
        }
    }

    let rows = locations
        .iter()
        .map(|loc| LocationInventory {
            id: loc.id,
            name: loc.name.clone(),
            items: by_location.remove(&loc.id).unwrap_or_default(),
        })
        .collect();

    finalize(rows, InclusionRule::for_filter(filter))
}

/// Apply the inclusion rule and the deterministic ordering to backend rows.
///
/// Items are ordered by name then id; locations by name then id.
pub fn finalize(rows: Vec<LocationInventory>, rule: InclusionRule) -> Vec<LocationInventory> {
    let mut rows: Vec<LocationInventory> = rows
        .into_iter()
        .filter(|row| rule.admits(row.items.len()))
        .collect();

    for row in &mut rows {
        row.items
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    }
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    rows
}
