//! Host Operations - Pure DOP Functions
//!
//! Explicit mutation interface over the host tables. Nothing here reaches into
//! private state; pipelines call these and nothing else.

use super::capabilities::{Block, Item, PlayerContext, StateDecoder, StateEncoder};
use super::host_data::{
    BlockItem, BlockStateData, CreativeInventory, HostData, IdentifierRecord, ItemParser,
    ItemStack, ItemTypeDictionary, RuntimeBlockRegistry, SavedItemData, StateDeserializerMap,
    StateSerializerMap,
};
use crate::error::{RegistryError, RegistryResult};
use crate::tag::TagCompound;
use std::sync::Arc;

impl Item for BlockItem {
    fn item_type_id(&self) -> i32 {
        self.block.block_type_id() as i32
    }

    fn name(&self) -> &str {
        self.block.name()
    }

    fn components(&self, _player: Option<&PlayerContext>) -> Option<TagCompound> {
        None
    }
}

// ===== Identifier records =====

/// Fail if `identifier` is already taken by any block or item
pub fn ensure_identifier_free(host: &HostData, identifier: &str) -> RegistryResult<()> {
    if host.records.contains_key(identifier) {
        return Err(RegistryError::DuplicateIdentifier {
            identifier: identifier.to_string(),
        });
    }
    Ok(())
}

/// Record a freshly registered identifier
pub fn record_identifier(host: &mut HostData, record: IdentifierRecord) -> RegistryResult<()> {
    ensure_identifier_free(host, &record.identifier)?;
    host.records.insert(record.identifier.clone(), record);
    Ok(())
}

pub fn identifier_record<'a>(host: &'a HostData, identifier: &str) -> Option<&'a IdentifierRecord> {
    host.records.get(identifier)
}

// ===== Runtime block registry =====

/// Store a block instance under its type id
pub fn register_runtime_block(
    registry: &mut RuntimeBlockRegistry,
    block: Arc<dyn Block>,
) -> RegistryResult<()> {
    let id = block.block_type_id();
    if registry.blocks.contains_key(&id) {
        return Err(RegistryError::DuplicateId { id });
    }
    registry.blocks.insert(id, block);
    Ok(())
}

pub fn is_runtime_block_registered(registry: &RuntimeBlockRegistry, id: u32) -> bool {
    registry.blocks.contains_key(&id)
}

pub fn get_runtime_block(registry: &RuntimeBlockRegistry, id: u32) -> Option<Arc<dyn Block>> {
    registry.blocks.get(&id).cloned()
}

// ===== State serializer / deserializer =====

/// Map the encoder used for every instance of `block`'s type
pub fn map_encoder(
    serializers: &mut StateSerializerMap,
    block: &dyn Block,
    encoder: Arc<dyn StateEncoder>,
) -> RegistryResult<()> {
    let id = block.block_type_id();
    if serializers.encoders.contains_key(&id) {
        return Err(RegistryError::DuplicateId { id });
    }
    serializers.encoders.insert(id, encoder);
    Ok(())
}

/// Map the decoder used for states named `identifier`
pub fn map_decoder(
    deserializers: &mut StateDeserializerMap,
    identifier: &str,
    decoder: Arc<dyn StateDecoder>,
) -> RegistryResult<()> {
    if deserializers.decoders.contains_key(identifier) {
        return Err(RegistryError::DuplicateIdentifier {
            identifier: identifier.to_string(),
        });
    }
    deserializers.decoders.insert(identifier.to_string(), decoder);
    Ok(())
}

pub fn serialize_block(
    serializers: &StateSerializerMap,
    block: &dyn Block,
) -> RegistryResult<BlockStateData> {
    let encoder = serializers
        .encoders
        .get(&block.block_type_id())
        .ok_or_else(|| RegistryError::UnmappedState {
            context: format!("block type {} ({})", block.block_type_id(), block.name()),
        })?;
    encoder.encode(block)
}

pub fn deserialize_state(
    deserializers: &StateDeserializerMap,
    state: &BlockStateData,
) -> RegistryResult<Arc<dyn Block>> {
    let decoder = deserializers
        .decoders
        .get(&state.name)
        .ok_or_else(|| RegistryError::UnmappedState {
            context: format!("state '{}'", state.name),
        })?;
    decoder.decode(state)
}

// ===== Creative inventory =====

pub fn add_creative(inventory: &mut CreativeInventory, stack: ItemStack) {
    log::debug!("Creative inventory += {}", stack.identifier);
    inventory.stacks.push(stack);
}

// ===== Item type dictionary =====

/// Fail if binding `identifier` <-> `id` would clash with an existing mapping.
///
/// Re-binding the exact same pair is allowed.
pub fn check_item_mapping(
    dictionary: &ItemTypeDictionary,
    identifier: &str,
    id: i32,
) -> RegistryResult<()> {
    if let Some(existing) = dictionary.string_to_int.get(identifier) {
        if *existing != id {
            return Err(RegistryError::DictionaryConflict {
                identifier: identifier.to_string(),
                id,
                existing: format!("id {}", existing),
            });
        }
    }
    if let Some(existing) = dictionary.int_to_string.get(&id) {
        if existing != identifier {
            return Err(RegistryError::DictionaryConflict {
                identifier: identifier.to_string(),
                id,
                existing: format!("identifier '{}'", existing),
            });
        }
    }
    Ok(())
}

/// Bind `identifier` <-> `id` in both directions
pub fn register_item_mapping(
    dictionary: &mut ItemTypeDictionary,
    identifier: &str,
    id: i32,
) -> RegistryResult<()> {
    check_item_mapping(dictionary, identifier, id)?;
    dictionary.int_to_string.insert(id, identifier.to_string());
    dictionary.string_to_int.insert(identifier.to_string(), id);
    Ok(())
}

pub fn item_id_of(dictionary: &ItemTypeDictionary, identifier: &str) -> Option<i32> {
    dictionary.string_to_int.get(identifier).copied()
}

pub fn identifier_of(dictionary: &ItemTypeDictionary, id: i32) -> Option<&str> {
    dictionary.int_to_string.get(&id).map(String::as_str)
}

// ===== Item parser =====

pub fn register_item_prototype(parser: &mut ItemParser, identifier: &str, item: Arc<dyn Item>) {
    parser.prototypes.insert(identifier.to_string(), item);
}

/// A fresh stack of `count` built from the registered prototype
pub fn parse_item(parser: &ItemParser, identifier: &str, count: u32) -> Option<ItemStack> {
    parser.prototypes.get(identifier).map(|item| ItemStack {
        identifier: identifier.to_string(),
        item: Arc::clone(item),
        count,
    })
}

// ===== Item save data =====

/// Saved form of `item`: the identifier its type id is bound to
pub fn serialize_item(dictionary: &ItemTypeDictionary, item: &dyn Item) -> RegistryResult<SavedItemData> {
    let name = identifier_of(dictionary, item.item_type_id()).ok_or_else(|| {
        RegistryError::UnmappedState {
            context: format!("item type {} ({})", item.item_type_id(), item.name()),
        }
    })?;
    Ok(SavedItemData {
        name: name.to_string(),
    })
}

/// A stack of `count` rebuilt from saved data
pub fn deserialize_item(parser: &ItemParser, saved: &SavedItemData, count: u32) -> RegistryResult<ItemStack> {
    parse_item(parser, &saved.name, count).ok_or_else(|| RegistryError::UnmappedState {
        context: format!("item '{}'", saved.name),
    })
}
