use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, OwnerId};

/// Availability status of an inventory item (closed set).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Active,
    Unavailable,
    Slow,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [ItemStatus::Active, ItemStatus::Unavailable, ItemStatus::Slow];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::Unavailable => "Unavailable",
            ItemStatus::Slow => "Slow",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ItemStatus::Active),
            "unavailable" => Ok(ItemStatus::Unavailable),
            "slow" => Ok(ItemStatus::Slow),
            other => Err(DomainError::validation(format!(
                "status must be one of: Active, Unavailable, Slow (got '{other}')"
            ))),
        }
    }
}

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub drawing: String,
    pub quantity: i64,
    pub status: ItemStatus,
    pub owner_id: OwnerId,
    /// Last write time; `None` until a write stamps it.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Materialize a record from its insert payload and the store-assigned id.
    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            drawing: new.drawing,
            quantity: new.quantity,
            status: new.status,
            owner_id: new.owner_id,
            updated_at: new.updated_at,
        }
    }

    /// Replace the mutable subset of fields. Returns whether anything changed.
    ///
    /// `id` and `name` are never touched.
    pub fn apply_patch(&mut self, patch: &ItemPatch) -> bool {
        let before = self.clone();

        self.description = patch.description.clone();
        self.drawing = patch.drawing.clone();
        self.quantity = patch.quantity;
        self.status = patch.status;
        self.owner_id = patch.owner_id.clone();
        self.updated_at = patch.updated_at;

        *self != before
    }

    /// Does `term` occur (case-insensitively) in name, description or drawing?
    pub fn mentions(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.name, &self.description, &self.drawing]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Insert payload: every field except the store-assigned `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub drawing: String,
    pub quantity: i64,
    pub status: ItemStatus,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        validate_quantity(self.quantity)
    }
}

/// Full replacement of the mutable field subset.
///
/// There is deliberately no `name` here: names are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub description: String,
    pub drawing: String,
    pub quantity: i64,
    pub status: ItemStatus,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        validate_quantity(self.quantity)
    }
}

fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    Ok(())
}
