//! Host Data - Pure DOP
//!
//! Tables the registration pipelines write into. NO METHODS beyond Debug glue.
//! All transformations happen in host_operations.rs

use super::capabilities::{Block, Item, StateDecoder, StateEncoder};
use crate::palette::StateProperties;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Serialized form of one block instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStateData {
    pub name: String,
    pub states: StateProperties,
}

/// Saved form of an item: just the identifier it was registered under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItemData {
    pub name: String,
}

/// Which namespace a numeric id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Block,
    Item,
}

/// One registered identifier; never mutated or removed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    pub identifier: String,
    pub numeric_id: i32,
    pub kind: TypeKind,
}

/// Runtime object table, by numeric id
#[derive(Default)]
pub struct RuntimeBlockRegistry {
    pub blocks: FxHashMap<u32, Arc<dyn Block>>,
}

/// Block type id -> encoder
#[derive(Default)]
pub struct StateSerializerMap {
    pub encoders: FxHashMap<u32, Arc<dyn StateEncoder>>,
}

/// Identifier -> decoder
#[derive(Default)]
pub struct StateDeserializerMap {
    pub decoders: FxHashMap<String, Arc<dyn StateDecoder>>,
}

/// A counted instance of an item type
#[derive(Debug, Clone)]
pub struct ItemStack {
    pub identifier: String,
    pub item: Arc<dyn Item>,
    pub count: u32,
}

/// The item form of a placeable block
#[derive(Debug, Clone)]
pub struct BlockItem {
    pub identifier: String,
    pub block: Arc<dyn Block>,
}

/// Creative menu contents, in insertion order
#[derive(Debug, Default)]
pub struct CreativeInventory {
    pub stacks: Vec<ItemStack>,
}

/// Bidirectional id <-> identifier dictionary shared by blocks and items
#[derive(Debug, Default, Clone)]
pub struct ItemTypeDictionary {
    pub int_to_string: FxHashMap<i32, String>,
    pub string_to_int: FxHashMap<String, i32>,
}

/// Identifier -> item prototype, used to hand out fresh stacks
#[derive(Debug, Default)]
pub struct ItemParser {
    pub prototypes: FxHashMap<String, Arc<dyn Item>>,
}

/// Every host-side table, owned together
#[derive(Default)]
pub struct HostData {
    pub runtime_blocks: RuntimeBlockRegistry,
    pub serializers: StateSerializerMap,
    pub deserializers: StateDeserializerMap,
    pub creative_inventory: CreativeInventory,
    pub item_dictionary: ItemTypeDictionary,
    pub item_parser: ItemParser,
    /// Every identifier registered so far, blocks and items alike
    pub records: IndexMap<String, IdentifierRecord>,
}

impl fmt::Debug for RuntimeBlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeBlockRegistry")
            .field("blocks", &self.blocks.len())
            .finish()
    }
}

impl fmt::Debug for StateSerializerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSerializerMap")
            .field("encoders", &self.encoders.len())
            .finish()
    }
}

impl fmt::Debug for StateDeserializerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDeserializerMap")
            .field("decoders", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Debug for HostData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostData")
            .field("runtime_blocks", &self.runtime_blocks)
            .field("serializers", &self.serializers)
            .field("deserializers", &self.deserializers)
            .field("creative_inventory", &self.creative_inventory.stacks.len())
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}
