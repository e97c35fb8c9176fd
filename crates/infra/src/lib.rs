//! Infrastructure layer: the inventory query layer, its collections, schema
//! migrations and configuration.

pub mod config;
pub mod inventory;
pub mod migrations;
pub mod store;


pub use config::{AppConfig, ConfigError};
pub use inventory::{InventoryError, InventoryRepository, PageRequest};
pub use store::{
    BatchInsert, InMemoryItemCollection, ItemCollection, ItemFilter, PostgresItemCollection,
    RejectedDocument, SearchField, StoreError,
};
