use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, LocationId};

/// A place that holds items (a room, a shelf, a garage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> LocationId {
        self.id
    }
}

/// Validated input for creating or renaming a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    name: String,
}

impl NewLocation {
    /// Validate a raw (possibly missing) name. The stored name is trimmed.
    pub fn parse(name: Option<&str>) -> DomainResult<Self> {
        let name = name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(DomainError::validation(
                "name",
                "location name is required and must be a non-empty string",
            ));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_location(self, id: LocationId) -> Location {
        Location {
            id,
            name: self.name,
        }
    }
}
