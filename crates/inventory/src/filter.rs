//! Inventory filter specification and its typed predicate list.
//!
//! A filter is normalized on construction: blank values mean "not specified".
//! Backends never inspect the filter's fields directly; they consume
//! [`InventoryFilter::predicates`] and compile each [`Predicate`] into whatever
//! their query representation is.

use stockroom_core::{DomainError, DomainResult, LocationId};

use crate::item::Item;

/// Optional, conjunctive narrowing of an inventory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    category: Option<String>,
    location_id: Option<LocationId>,
    name: Option<String>,
}

impl InventoryFilter {
    /// A filter with no active predicates.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn new(category: Option<String>, location_id: Option<LocationId>, name: Option<String>) -> Self {
        Self {
            category: normalize(category),
            location_id,
            name: normalize(name),
        }
    }

    /// Build a filter from raw query parameters.
    ///
    /// A non-blank `location_id` that is not a valid identifier is rejected here so
    /// it never reaches storage.
    pub fn from_params(
        category: Option<&str>,
        location_id: Option<&str>,
        name: Option<&str>,
    ) -> DomainResult<Self> {
        let location_id = match location_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<LocationId>().map_err(|_| {
                DomainError::validation("location_id", "location_id must be a valid location identifier")
            })?),
            None => None,
        };

        Ok(Self::new(
            category.map(str::to_string),
            location_id,
            name.map(str::to_string),
        ))
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location_id.is_none() && self.name.is_none()
    }

    /// Active predicates, in a fixed order (location, category, name).
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::with_capacity(3);
        if let Some(id) = self.location_id {
            out.push(Predicate::LocationIs(id));
        }
        if let Some(category) = &self.category {
            out.push(Predicate::CategoryIs(category.clone()));
        }
        if let Some(name) = &self.name {
            out.push(Predicate::NameContains(name.clone()));
        }
        out
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether a predicate narrows the location set or the item set.
///
/// Both scopes end up constraining items; the distinction only tells a SQL
/// backend where the condition belongs (join WHERE vs aggregate FILTER).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PredicateScope {
    Location,
    Item,
}

/// One active filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact category label match.
    CategoryIs(String),
    /// Item is stored at this location.
    LocationIs(LocationId),
    /// Case-insensitive substring of the item name.
    NameContains(String),
}

impl Predicate {
    pub fn scope(&self) -> PredicateScope {
        match self {
            Predicate::LocationIs(_) => PredicateScope::Location,
            Predicate::CategoryIs(_) | Predicate::NameContains(_) => PredicateScope::Item,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Predicate::CategoryIs(category) => item.category == *category,
            Predicate::LocationIs(id) => item.location_id == *id,
            Predicate::NameContains(fragment) => item
                .name
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
        }
    }
}
