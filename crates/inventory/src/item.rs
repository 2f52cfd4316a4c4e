use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ItemId, LocationId};

/// Category labels offered by clients. Storage accepts any non-blank label.
pub const KNOWN_CATEGORIES: [&str; 3] = ["Electronic", "Furniture", "Other"];

/// An item stored at exactly one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub location_id: LocationId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl Item {
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            notes: self.notes.clone(),
        }
    }
}

/// Item as nested under its location in an inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// Validated input for creating or replacing an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub location_id: LocationId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl ItemDraft {
    /// Validate raw item fields.
    ///
    /// Checks run in a fixed order (location, name, category, quantity) and the
    /// first failure is reported. Text fields are trimmed; blank notes become `None`.
    pub fn parse(
        location_id: Option<&str>,
        name: Option<&str>,
        category: Option<&str>,
        quantity: Option<i64>,
        notes: Option<&str>,
    ) -> DomainResult<Self> {
        let location_id = match location_id.map(str::trim) {
            None | Some("") => {
                return Err(DomainError::validation("location_id", "location_id is required"));
            }
            Some(raw) => raw.parse::<LocationId>().map_err(|_| {
                DomainError::validation("location_id", "location_id must be a valid location identifier")
            })?,
        };

        let name = required_text("name", name)?;
        let category = required_text("category", category)?;

        let quantity = match quantity {
            None => {
                return Err(DomainError::validation(
                    "quantity",
                    "quantity is required and must be a non-negative number",
                ));
            }
            Some(q) if q < 0 => {
                return Err(DomainError::validation("quantity", "quantity must be non-negative"));
            }
            Some(q) => q,
        };

        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            location_id,
            name,
            category,
            quantity,
            notes,
        })
    }

    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            location_id: self.location_id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            notes: self.notes,
        }
    }
}

fn required_text(field: &'static str, raw: Option<&str>) -> DomainResult<String> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(DomainError::validation(
            field,
            format!("{field} is required and must be a non-empty string"),
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> String {
        LocationId::new().to_string()
    }

    #[test]
    fn parse_accepts_complete_draft_and_trims() {
        let location = loc();
        let draft = ItemDraft::parse(
            Some(location.as_str()),
            Some(" Laptop "),
            Some("Electronic "),
            Some(2),
            Some("  work machine "),
        )
        .unwrap();

        assert_eq!(draft.location_id.to_string(), location);
        assert_eq!(draft.name, "Laptop");
        assert_eq!(draft.category, "Electronic");
        assert_eq!(draft.quantity, 2);
        assert_eq!(draft.notes.as_deref(), Some("work machine"));
    }

    #[test]
    fn parse_rejects_negative_quantity() {
        let location = loc();
        let err = ItemDraft::parse(Some(location.as_str()), Some("Chair"), Some("Furniture"), Some(-1), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn parse_accepts_zero_quantity() {
        let location = loc();
        let draft =
            ItemDraft::parse(Some(location.as_str()), Some("Chair"), Some("Furniture"), Some(0), None).unwrap();
        assert_eq!(draft.quantity, 0);
    }

    #[test]
    fn parse_reports_first_missing_field() {
        let err = ItemDraft::parse(None, None, None, None, None).unwrap_err();
        assert_eq!(err.field(), Some("location_id"));

        let location = loc();
        let err = ItemDraft::parse(Some(location.as_str()), Some("  "), None, None, None).unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let err = ItemDraft::parse(Some(location.as_str()), Some("Desk"), Some(""), Some(1), None).unwrap_err();
        assert_eq!(err.field(), Some("category"));

        let err = ItemDraft::parse(Some(location.as_str()), Some("Desk"), Some("Furniture"), None, None)
            .unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn parse_rejects_malformed_location_id() {
        let err = ItemDraft::parse(Some("garage"), Some("Desk"), Some("Furniture"), Some(1), None)
            .unwrap_err();
        assert_eq!(err.field(), Some("location_id"));
    }

    #[test]
    fn blank_notes_become_none() {
        let location = loc();
        let draft =
            ItemDraft::parse(Some(location.as_str()), Some("Desk"), Some("Furniture"), Some(1), Some("   "))
                .unwrap();
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn summary_drops_location_reference() {
        let location = loc();
        let item = ItemDraft::parse(Some(location.as_str()), Some("Desk"), Some("Furniture"), Some(1), None)
            .unwrap()
            .into_item(ItemId::new(9));
        let json = serde_json::to_value(item.summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 9,
                "name": "Desk",
                "category": "Furniture",
                "quantity": 1,
                "notes": null,
            })
        );
    }
}
