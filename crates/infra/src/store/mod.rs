//! Inventory collection abstractions.
//!
//! `ItemCollection` is the document-collection seam the query layer talks to.
//! It is deliberately dumb: filtering, skipping and limiting, with no notion
//! of owners or pages beyond what a filter says.

pub mod filter;
pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use stockroom_core::ItemId;
use stockroom_inventory::{Item, ItemPatch, NewItem};

pub use filter::{ItemFilter, SearchField};
pub use in_memory::InMemoryItemCollection;
pub use postgres::PostgresItemCollection;

/// Collection operation error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Connectivity or transport fault; the operation may or may not have
    /// reached the store.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused this particular document (constraint violation).
    #[error("document rejected: {0}")]
    Rejected(String),
}

/// One document of a batch that the store refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedDocument {
    /// Position in the submitted batch.
    pub index: usize,
    pub reason: String,
}

/// Outcome of a non-atomic batch insert.
///
/// `inserted` is in submission order and skips rejected positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchInsert {
    pub inserted: Vec<ItemId>,
    pub rejected: Vec<RejectedDocument>,
}

impl BatchInsert {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Outcome of an update keyed by id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: bool,
    pub modified: bool,
}

/// Async document collection holding inventory items.
///
/// Results of `find` come back in insertion order.
#[async_trait]
pub trait ItemCollection: Send + Sync {
    /// Matching documents, skipping `skip` and returning at most `limit`.
    /// A `limit` of zero returns nothing.
    async fn find(&self, filter: &ItemFilter, skip: u64, limit: u64) -> Result<Vec<Item>, StoreError>;

    async fn find_one_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Insert one document; the collection assigns its id.
    async fn insert_one(&self, item: NewItem) -> Result<ItemId, StoreError>;

    /// Insert documents in order. Per-document rejections are reported in the
    /// outcome; a transport fault before anything was written is an error.
    async fn insert_many(&self, items: Vec<NewItem>) -> Result<BatchInsert, StoreError>;

    async fn update_one_by_id(&self, id: ItemId, patch: &ItemPatch) -> Result<UpdateOutcome, StoreError>;

    /// Number of documents removed (0 or 1).
    async fn delete_one_by_id(&self, id: ItemId) -> Result<u64, StoreError>;

    /// Number of documents removed.
    async fn delete_many(&self, filter: &ItemFilter) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> ItemCollection for Arc<S>
where
    S: ItemCollection + ?Sized,
{
    async fn find(&self, filter: &ItemFilter, skip: u64, limit: u64) -> Result<Vec<Item>, StoreError> {
        (**self).find(filter, skip, limit).await
    }

    async fn find_one_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        (**self).find_one_by_id(id).await
    }

    async fn insert_one(&self, item: NewItem) -> Result<ItemId, StoreError> {
        (**self).insert_one(item).await
    }

    async fn insert_many(&self, items: Vec<NewItem>) -> Result<BatchInsert, StoreError> {
        (**self).insert_many(items).await
    }

    async fn update_one_by_id(&self, id: ItemId, patch: &ItemPatch) -> Result<UpdateOutcome, StoreError> {
        (**self).update_one_by_id(id, patch).await
    }

    async fn delete_one_by_id(&self, id: ItemId) -> Result<u64, StoreError> {
        (**self).delete_one_by_id(id).await
    }

    async fn delete_many(&self, filter: &ItemFilter) -> Result<u64, StoreError> {
        (**self).delete_many(filter).await
    }
}

/// Per-document constraints every collection enforces, mirroring the check
/// constraints of the relational schema.
pub(crate) fn check_document(name: Option<&str>, quantity: i64) -> Result<(), StoreError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(StoreError::Rejected("name cannot be empty".to_string()));
        }
    }
    if quantity < 0 {
        return Err(StoreError::Rejected("quantity cannot be negative".to_string()));
    }
    Ok(())
}
