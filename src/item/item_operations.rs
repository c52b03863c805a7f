//! Item Operations - Pure DOP Functions
//!
//! Registration and wire views for custom items. Every check runs before the
//! first mutation, so a rejected item leaves no trace.

use super::item_data::{ItemComponentEntry, ItemTypeEntry, RegisteredItem};
use crate::context::RegistryContext;
use crate::error::{OptionExt, RegistryError, RegistryResult};
use crate::host::{
    add_creative, check_item_mapping, ensure_identifier_free, parse_item, record_identifier,
    register_item_mapping, register_item_prototype, Block, BlockItem, IdentifierRecord, Item,
    ItemStack, PlayerContext, TypeKind,
};
use crate::metadata::item_component_descriptor;
use indexmap::IndexMap;
use std::sync::Arc;

fn component_entry(item: &dyn Item, identifier: &str, id: i32, player: Option<&PlayerContext>) -> Option<ItemComponentEntry> {
    item.components(player).map(|components| ItemComponentEntry {
        identifier: identifier.to_string(),
        descriptor: item_component_descriptor(components, id, identifier),
    })
}

/// Register a custom item under `identifier`.
///
/// The numeric id is the item's own type id. Returns that id.
pub fn register_item(
    ctx: &mut RegistryContext,
    identifier: &str,
    item: Arc<dyn Item>,
) -> RegistryResult<i32> {
    if identifier.is_empty() {
        return Err(RegistryError::validation("item identifier must not be empty"));
    }
    ensure_identifier_free(&ctx.host, identifier)?;
    let id = item.item_type_id();
    check_item_mapping(&ctx.host.item_dictionary, identifier, id)?;
    let baseline = component_entry(item.as_ref(), identifier, id, None);

    record_identifier(
        &mut ctx.host,
        IdentifierRecord {
            identifier: identifier.to_string(),
            numeric_id: id,
            kind: TypeKind::Item,
        },
    )?;
    register_item_mapping(&mut ctx.host.item_dictionary, identifier, id)?;
    register_item_prototype(&mut ctx.host.item_parser, identifier, Arc::clone(&item));

    let has_components = baseline.is_some();
    if let Some(entry) = baseline {
        ctx.items.component_entries.insert(identifier.to_string(), entry);
    }
    ctx.items.table_entries.push(ItemTypeEntry {
        identifier: identifier.to_string(),
        numeric_id: id,
        has_components,
    });
    ctx.items.registered.push(RegisteredItem {
        identifier: identifier.to_string(),
        numeric_id: id,
        item: Arc::clone(&item),
    });
    add_creative(
        &mut ctx.host.creative_inventory,
        ItemStack {
            identifier: identifier.to_string(),
            item,
            count: 1,
        },
    );

    log::info!(
        "Registered item '{}' with id {} (components: {})",
        identifier,
        id,
        has_components
    );
    Ok(id)
}

/// Make a placeable block available as an item under its block id.
///
/// Adds a dictionary mapping, a parser prototype and a table entry; blocks
/// carry their own metadata so no component entry is created.
pub fn register_block_item(
    ctx: &mut RegistryContext,
    identifier: &str,
    block: Arc<dyn Block>,
) -> RegistryResult<i32> {
    let id = block_item_id(block.as_ref())?;
    register_item_mapping(&mut ctx.host.item_dictionary, identifier, id)?;
    register_item_prototype(
        &mut ctx.host.item_parser,
        identifier,
        Arc::new(BlockItem {
            identifier: identifier.to_string(),
            block,
        }),
    );
    ctx.items.table_entries.push(ItemTypeEntry {
        identifier: identifier.to_string(),
        numeric_id: id,
        has_components: false,
    });
    log::debug!("Registered block item '{}' with id {}", identifier, id);
    Ok(id)
}

/// Item-facing id of a block
pub fn block_item_id(block: &dyn Block) -> RegistryResult<i32> {
    i32::try_from(block.block_type_id()).map_err(|_| {
        RegistryError::validation(format!(
            "block id {} of '{}' does not fit an item id",
            block.block_type_id(),
            block.name()
        ))
    })
}

/// Rebuild every component descriptor for `player`.
///
/// Returns a fresh mapping; the cached baseline is left alone.
pub fn regenerate_item_components(
    ctx: &RegistryContext,
    player: &PlayerContext,
) -> IndexMap<String, ItemComponentEntry> {
    ctx.items
        .registered
        .iter()
        .filter_map(|registered| {
            component_entry(
                registered.item.as_ref(),
                &registered.identifier,
                registered.numeric_id,
                Some(player),
            )
        })
        .map(|entry| (entry.identifier.clone(), entry))
        .collect()
}

/// Component entries sent to clients: the baseline for `None`, a per-player
/// regeneration otherwise
pub fn item_component_entries(
    ctx: &RegistryContext,
    player: Option<&PlayerContext>,
) -> Vec<ItemComponentEntry> {
    match player {
        None => ctx.items.component_entries.values().cloned().collect(),
        Some(player) => regenerate_item_components(ctx, player)
            .into_values()
            .collect(),
    }
}

pub fn item_table_entries(ctx: &RegistryContext) -> &[ItemTypeEntry] {
    &ctx.items.table_entries
}

/// A fresh stack of `amount` of a registered item or block item
pub fn get_item(ctx: &RegistryContext, identifier: &str, amount: u32) -> RegistryResult<ItemStack> {
    parse_item(&ctx.host.item_parser, identifier, amount).or_not_registered(identifier)
}
