use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use stockroom_core::ItemId;
use stockroom_inventory::{Item, ItemPatch, NewItem};

use super::{
    check_document, BatchInsert, ItemCollection, ItemFilter, RejectedDocument, StoreError,
    UpdateOutcome,
};

/// In-memory inventory collection for tests/dev.
///
/// Documents are kept in insertion order. `set_offline(true)` makes every
/// operation fail with `StoreError::Unavailable`, which lets callers exercise
/// their outage paths.
#[derive(Debug, Default)]
pub struct InMemoryItemCollection {
    items: RwLock<Vec<Item>>,
    offline: AtomicBool,
}

impl InMemoryItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Item>>, StoreError> {
        self.ensure_online()?;
        self.items
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Item>>, StoreError> {
        self.ensure_online()?;
        self.items
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory collection is offline".to_string()));
        }
        Ok(())
    }

    fn insert_locked(items: &mut Vec<Item>, new: NewItem) -> Result<ItemId, StoreError> {
        check_document(Some(&new.name), new.quantity)?;
        let id = ItemId::new();
        items.push(Item::from_new(id, new));
        Ok(id)
    }
}

#[async_trait]
impl ItemCollection for InMemoryItemCollection {
    async fn find(&self, filter: &ItemFilter, skip: u64, limit: u64) -> Result<Vec<Item>, StoreError> {
        let items = self.read()?;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(items
            .iter()
            .filter(|item| filter.matches(item))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_one_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let items = self.read()?;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn insert_one(&self, item: NewItem) -> Result<ItemId, StoreError> {
        let mut items = self.write()?;
        Self::insert_locked(&mut items, item)
    }

    async fn insert_many(&self, batch: Vec<NewItem>) -> Result<BatchInsert, StoreError> {
        let mut items = self.write()?;
        let mut outcome = BatchInsert::default();

        for (index, new) in batch.into_iter().enumerate() {
            match Self::insert_locked(&mut items, new) {
                Ok(id) => outcome.inserted.push(id),
                Err(e) => outcome.rejected.push(RejectedDocument {
                    index,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(outcome)
    }

    async fn update_one_by_id(&self, id: ItemId, patch: &ItemPatch) -> Result<UpdateOutcome, StoreError> {
        let mut items = self.write()?;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(UpdateOutcome {
                matched: false,
                modified: false,
            });
        };

        check_document(None, patch.quantity)?;
        let modified = item.apply_patch(patch);
        Ok(UpdateOutcome {
            matched: true,
            modified,
        })
    }

    async fn delete_one_by_id(&self, id: ItemId) -> Result<u64, StoreError> {
        let mut items = self.write()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok((before - items.len()) as u64)
    }

    async fn delete_many(&self, filter: &ItemFilter) -> Result<u64, StoreError> {
        let mut items = self.write()?;
        let before = items.len();
        items.retain(|item| !filter.matches(item));
        Ok((before - items.len()) as u64)
    }
}
