use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, OwnerId};
use stockroom_inventory::{Item, ItemPatch, ItemStatus, NewItem, FIELD_SPECS};
use stockroom_infra::BatchInsert;

// -------------------------
// Request DTOs
// -------------------------

/// Item as submitted through the JSON API (owner and write time are stamped
/// server-side).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiItemInput {
    pub name: String,
    pub description: String,
    pub drawing: String,
    pub quantity: i64,
    pub status: ItemStatus,
}

impl ApiItemInput {
    pub fn into_new_item(self, owner_id: &OwnerId, now: DateTime<Utc>) -> NewItem {
        NewItem {
            name: self.name,
            description: self.description,
            drawing: self.drawing,
            quantity: self.quantity,
            status: self.status,
            owner_id: owner_id.clone(),
            updated_at: Some(now),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MoreItemsQuery {
    pub page: i64,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub name_in: String,
    pub description_in: String,
    pub drawing_in: String,
    pub quantity_in: i64,
    pub status_in: String,
}

impl AddItemForm {
    pub fn into_new_item(self, owner_id: &OwnerId, now: DateTime<Utc>) -> DomainResult<NewItem> {
        let item = NewItem {
            name: self.name_in.trim().to_string(),
            description: self.description_in,
            drawing: self.drawing_in,
            quantity: self.quantity_in,
            status: self.status_in.parse()?,
            owner_id: owner_id.clone(),
            updated_at: Some(now),
        };
        item.validate()?;
        Ok(item)
    }
}

/// Edit form; there is no name field because names are fixed.
#[derive(Debug, Deserialize)]
pub struct UpdateItemForm {
    pub description_in: String,
    pub drawing_in: String,
    pub quantity_in: i64,
    pub status_in: String,
}

impl UpdateItemForm {
    pub fn into_patch(self, owner_id: &OwnerId, now: DateTime<Utc>) -> DomainResult<ItemPatch> {
        let patch = ItemPatch {
            description: self.description_in,
            drawing: self.drawing_in,
            quantity: self.quantity_in,
            status: self.status_in.parse()?,
            owner_id: owner_id.clone(),
            updated_at: Some(now),
        };
        patch.validate()?;
        Ok(patch)
    }
}

/// Normalize a search parameter: blank input and the literal `"None"` a
/// client echoes back for an unset search both mean "no search".
pub fn clean_search(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|term| !term.is_empty() && *term != "None")
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.to_string(),
        "name": item.name,
        "description": item.description,
        "drawing": item.drawing,
        "quantity": item.quantity,
        "status": item.status.as_str(),
        "owner_id": item.owner_id.as_str(),
        "updated_at": item.updated_at.map(|at| at.to_rfc3339()),
    })
}

/// View model for a page of rows.
pub fn page_view(items: &[Item], current_page: i64, search: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "items": items.iter().map(item_to_json).collect::<Vec<_>>(),
        "count": items.len(),
        "current_page": current_page,
        "search": search,
        "field_specs": FIELD_SPECS,
    })
}

pub fn item_view(item: &Item, with_field_specs: bool) -> serde_json::Value {
    let mut view = serde_json::json!({ "item": item_to_json(item) });
    if with_field_specs {
        view["field_specs"] = serde_json::json!(FIELD_SPECS);
    }
    view
}

pub fn batch_to_json(batch: &BatchInsert) -> serde_json::Value {
    serde_json::json!({
        "message": "Items added successfully",
        "item_ids": batch.inserted.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        "failures": batch.rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_search_treats_none_and_blank_as_absent() {
        assert_eq!(clean_search(None), None);
        assert_eq!(clean_search(Some("None")), None);
        assert_eq!(clean_search(Some("   ")), None);
        assert_eq!(clean_search(Some(" bolt ")), Some("bolt"));
    }

    #[test]
    fn add_form_rejects_unknown_status() {
        let form = AddItemForm {
            name_in: "Cube".to_string(),
            description_in: String::new(),
            drawing_in: String::new(),
            quantity_in: 1,
            status_in: "Gone".to_string(),
        };
        assert!(form.into_new_item(&OwnerId::new("u1"), Utc::now()).is_err());
    }

    #[test]
    fn update_form_stamps_owner_and_time() {
        let now = Utc::now();
        let form = UpdateItemForm {
            description_in: "d".to_string(),
            drawing_in: "x.dwg".to_string(),
            quantity_in: 5,
            status_in: "Slow".to_string(),
        };
        let patch = form.into_patch(&OwnerId::new("u1"), now).unwrap();
        assert_eq!(patch.owner_id.as_str(), "u1");
        assert_eq!(patch.updated_at, Some(now));
        assert_eq!(patch.status, ItemStatus::Slow);
    }
}
