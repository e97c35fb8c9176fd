//! Inventory query layer.
//!
//! `InventoryRepository` owns every read and write against the inventory
//! collection. It builds owner-scoped filters, turns 1-based pages into
//! skip/limit, translates external id strings into `ItemId`s and folds
//! collection errors into `InventoryError`.
//!
//! ## Owner Isolation
//!
//! `list_page` and `search` always AND an `OwnerIs` clause into the filter, so
//! one browser never sees another browser's items. Lookups by id are not
//! owner-scoped: an id is only learned from a listing.
//!
//! ## Failure Model
//!
//! Transport faults surface as `StorageUnavailable` and are never retried here.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use stockroom_core::{DomainError, ItemId, OwnerId};
use stockroom_inventory::{Item, ItemPatch, NewItem};

use crate::store::{BatchInsert, ItemCollection, ItemFilter, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The external id representation could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Well-formed id, no such record.
    #[error("item not found")]
    NotFound,

    /// A batch insert stored nothing.
    #[error("insert failed: {0}")]
    InsertFailed(String),

    /// The collection refused a single document (constraint violation).
    #[error("invalid item: {0}")]
    InvalidItem(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(msg) => InventoryError::StorageUnavailable(msg),
            StoreError::Rejected(msg) => InventoryError::InvalidItem(msg),
        }
    }
}

impl From<DomainError> for InventoryError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidId(msg) => InventoryError::InvalidIdentifier(msg),
            DomainError::Validation(msg) => InventoryError::InvalidItem(msg),
            DomainError::NotFound => InventoryError::NotFound,
        }
    }
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: i64, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// `(page - 1) * page_size`, clamped to zero for pages below 1.
    pub fn offset(&self) -> u64 {
        let page = u64::try_from(self.page.saturating_sub(1)).unwrap_or(0);
        page.saturating_mul(u64::from(self.page_size))
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Inventory query layer over an explicitly supplied collection handle.
#[derive(Debug, Clone)]
pub struct InventoryRepository<C> {
    collection: C,
}

impl<C> InventoryRepository<C>
where
    C: ItemCollection,
{
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// One page of the owner's items, in insertion order.
    ///
    /// Pages past the end are empty, not an error.
    #[instrument(skip(self), fields(owner_id = %owner_id), err)]
    pub async fn list_page(
        &self,
        owner_id: &OwnerId,
        page: i64,
        page_size: u32,
    ) -> Result<Vec<Item>, InventoryError> {
        let page = PageRequest::new(page, page_size);
        let items = self
            .collection
            .find(&ItemFilter::owner(owner_id), page.offset(), page.limit())
            .await?;

        debug!(count = items.len(), "listed inventory page");
        Ok(items)
    }

    /// One page of the owner's items whose name, description or drawing
    /// contains `term` (case-insensitive, literal).
    ///
    /// An empty term is not special-cased here; it matches every item.
    #[instrument(skip(self), fields(owner_id = %owner_id), err)]
    pub async fn search(
        &self,
        owner_id: &OwnerId,
        term: &str,
        page: i64,
        page_size: u32,
    ) -> Result<Vec<Item>, InventoryError> {
        let page = PageRequest::new(page, page_size);
        let filter = ItemFilter::owner_search(owner_id, term);
        let items = self
            .collection
            .find(&filter, page.offset(), page.limit())
            .await?;

        debug!(count = items.len(), "searched inventory");
        Ok(items)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&self, item_id: &str) -> Result<Item, InventoryError> {
        let id = parse_id(item_id)?;
        self.collection
            .find_one_by_id(id)
            .await?
            .ok_or(InventoryError::NotFound)
    }

    /// Insert one item verbatim. Duplicate names are allowed.
    #[instrument(skip(self, item), fields(owner_id = %item.owner_id, name = %item.name), err)]
    pub async fn create(&self, item: NewItem) -> Result<ItemId, InventoryError> {
        let id = self.collection.insert_one(item).await?;
        debug!(item_id = %id, "created item");
        Ok(id)
    }

    /// Insert a batch, non-atomically.
    ///
    /// Ids of stored documents come back in input order together with the
    /// rejected positions. A non-empty batch that stores nothing fails with
    /// `InsertFailed`.
    #[instrument(skip(self, items), fields(batch = items.len()), err)]
    pub async fn create_many(&self, items: Vec<NewItem>) -> Result<BatchInsert, InventoryError> {
        if items.is_empty() {
            return Ok(BatchInsert::default());
        }

        let outcome = self.collection.insert_many(items).await?;

        if outcome.inserted.is_empty() {
            let reasons: Vec<String> = outcome
                .rejected
                .iter()
                .map(|r| format!("#{}: {}", r.index, r.reason))
                .collect();
            return Err(InventoryError::InsertFailed(reasons.join("; ")));
        }

        if !outcome.is_complete() {
            warn!(
                inserted = outcome.inserted.len(),
                rejected = outcome.rejected.len(),
                "batch insert partially failed"
            );
        }

        Ok(outcome)
    }

    /// Replace the mutable fields of one item.
    ///
    /// Succeeds even when the patch equals the current state.
    #[instrument(skip(self, patch), err)]
    pub async fn update(&self, item_id: &str, patch: ItemPatch) -> Result<(), InventoryError> {
        let id = parse_id(item_id)?;
        let outcome = self.collection.update_one_by_id(id, &patch).await?;

        if !outcome.matched {
            return Err(InventoryError::NotFound);
        }
        debug!(modified = outcome.modified, "updated item");
        Ok(())
    }

    /// Remove one item. Idempotent: returns whether anything was removed.
    #[instrument(skip(self), err)]
    pub async fn delete(&self, item_id: &str) -> Result<bool, InventoryError> {
        let id = parse_id(item_id)?;
        let removed = self.collection.delete_one_by_id(id).await?;
        Ok(removed > 0)
    }

    /// Remove every item, across all owners, last written before `cutoff`.
    ///
    /// Items never written (`updated_at` unset) are kept.
    #[instrument(skip(self), err)]
    pub async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, InventoryError> {
        let removed = self
            .collection
            .delete_many(&ItemFilter::updated_before(cutoff))
            .await?;

        if removed > 0 {
            tracing::info!(removed, %cutoff, "purged stale items");
        }
        Ok(removed)
    }
}

fn parse_id(raw: &str) -> Result<ItemId, InventoryError> {
    raw.parse::<ItemId>().map_err(InventoryError::from)
}
