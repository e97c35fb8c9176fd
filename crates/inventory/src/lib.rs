//! Inventory domain module.
//!
//! This crate contains the inventory record model and its business rules,
//! implemented as plain data and deterministic validation (no IO, no HTTP,
//! no storage).

pub mod demo;
pub mod fields;
pub mod item;

pub use demo::{demo_catalogue, DemoItem, DEMO_ITEMS};
pub use fields::{field_spec, FieldKind, FieldSpec, FIELD_SPECS};
pub use item::{Item, ItemPatch, ItemStatus, NewItem};
