//! Inventory domain module.
//!
//! This crate contains the business rules for locations and items, plus the
//! decision logic of the inventory query (which items survive a filter, which
//! locations are shown, and in what order). It is deterministic domain logic
//! only: no IO, no HTTP, no storage.

pub mod filter;
pub mod item;
pub mod location;
pub mod query;

pub use filter::{InventoryFilter, Predicate, PredicateScope};
pub use item::{Item, ItemDraft, ItemSummary, KNOWN_CATEGORIES};
pub use location::{Location, NewLocation};
pub use query::{InclusionRule, LocationInventory, assemble, finalize};
