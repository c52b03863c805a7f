//! Item Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in item_operations.rs

use crate::host::Item;
use crate::tag::TagCompound;
use indexmap::IndexMap;
use std::sync::Arc;

/// Item table entry as sent to clients at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTypeEntry {
    pub identifier: String,
    pub numeric_id: i32,
    pub has_components: bool,
}

/// Component descriptor of one item, tagged with its `id` and `name`
#[derive(Debug, Clone, PartialEq)]
pub struct ItemComponentEntry {
    pub identifier: String,
    pub descriptor: TagCompound,
}

/// A registered custom item, kept for regeneration and replication
#[derive(Debug, Clone)]
pub struct RegisteredItem {
    pub identifier: String,
    pub numeric_id: i32,
    pub item: Arc<dyn Item>,
}

/// Item-side registry state
#[derive(Debug, Default)]
pub struct ItemRegistryData {
    /// Custom items and block items, in registration order
    pub table_entries: Vec<ItemTypeEntry>,
    /// Baseline descriptors built at registration, never touched afterwards
    pub component_entries: IndexMap<String, ItemComponentEntry>,
    pub registered: Vec<RegisteredItem>,
}
