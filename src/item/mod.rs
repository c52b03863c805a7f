//! Item Registration Pipeline
//!
//! Registers custom items and the implicit items of placeable blocks into the
//! item type dictionary, caches item table entries and component descriptors,
//! and regenerates per-player component views on demand.

pub mod item_component;
pub mod item_data;
pub mod item_operations;

pub use item_component::{ComponentItem, ComponentSet, DestroyCreativeItemComponent, ItemComponent};
pub use item_data::{ItemComponentEntry, ItemRegistryData, ItemTypeEntry, RegisteredItem};
pub use item_operations::*;
