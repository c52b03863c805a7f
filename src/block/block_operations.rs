//! Block Operations - Pure DOP Functions
//!
//! `register_block` validates everything it can before touching shared state:
//! identifier, factory result, codecs, property domains, permutation bound and
//! item dictionary. Only then does it write into the host tables and palette.

use super::block_data::{
    BlockPaletteEntry, BlockProperty, BlockRegistration, CreativeInventoryInfo, RegisteredBlock,
};
use super::default_codecs::{EmptyStateEncoder, FixedStateDecoder};
use crate::context::RegistryContext;
use crate::error::{OptionExt, RegistryError, RegistryResult};
use crate::host::{
    add_creative, check_item_mapping, deserialize_state, ensure_identifier_free,
    get_runtime_block, is_runtime_block_registered, map_decoder, map_encoder, record_identifier,
    register_runtime_block, serialize_block, Block, BlockItem, BlockStateData, IdentifierRecord,
    ItemStack, StateDecoder, StateEncoder, TypeKind,
};
use crate::item::{block_item_id, register_block_item};
use crate::metadata::{
    assemble_block_metadata, block_base_components, model_components, permutable_metadata,
    ON_PLAYER_PLACING,
};
use crate::palette::{
    contains_name, ensure_palette_capacity, insert_state, lookup_state_id, validate_state_entry,
    StateEntry,
};
use crate::permutation::{expand, permutation_count, PropertyDomain};
use crate::tag::TagCompound;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Light values are nibbles
const MAX_LIGHT: u8 = 15;

/// Check the factory built the block it was asked for
fn validate_factory_result(identifier: &str, id: u32, block: &dyn Block) -> RegistryResult<()> {
    let invalid = |reason: String| RegistryError::InvalidFactoryResult {
        identifier: identifier.to_string(),
        reason,
    };
    if block.block_type_id() != id {
        return Err(invalid(format!(
            "built type id {} instead of allocated id {}",
            block.block_type_id(),
            id
        )));
    }
    if block.light_level() > MAX_LIGHT {
        return Err(invalid(format!("light level {} above {}", block.light_level(), MAX_LIGHT)));
    }
    if block.light_filter() > MAX_LIGHT {
        return Err(invalid(format!("light filter {} above {}", block.light_filter(), MAX_LIGHT)));
    }
    Ok(())
}

/// Turn declared properties into expander domains
fn property_domains(identifier: &str, properties: &[BlockProperty]) -> RegistryResult<Vec<PropertyDomain>> {
    let mut seen = FxHashSet::default();
    properties
        .iter()
        .map(|property| {
            if !seen.insert(property.name.as_str()) {
                return Err(RegistryError::validation(format!(
                    "block '{}' declares property '{}' twice",
                    identifier, property.name
                )));
            }
            if property.values.is_empty() {
                return Err(RegistryError::validation(format!(
                    "property '{}' of block '{}' has no values",
                    property.name, identifier
                )));
            }
            // each value must name exactly one state
            let mut values = FxHashSet::default();
            if let Some(repeated) = property.values.iter().find(|value| !values.insert(*value)) {
                return Err(RegistryError::validation(format!(
                    "property '{}' of block '{}' repeats value {}",
                    property.name, identifier, repeated
                )));
            }
            Ok(PropertyDomain {
                name: property.name.clone(),
                values: property.values.clone(),
            })
        })
        .collect()
}

/// One palette entry per permutation, tagged with its meta value
fn permutation_states(
    identifier: &str,
    domains: &[PropertyDomain],
    max_permutations: u32,
) -> RegistryResult<Vec<StateEntry>> {
    let count = permutation_count(domains);
    if count > u64::from(max_permutations) {
        return Err(RegistryError::PermutationOverflow {
            identifier: identifier.to_string(),
            count,
            max: max_permutations,
        });
    }

    expand(domains)
        .into_iter()
        .map(|permutation| {
            let meta = u16::try_from(permutation.meta).map_err(|_| {
                RegistryError::PermutationOverflow {
                    identifier: identifier.to_string(),
                    count,
                    max: max_permutations,
                }
            })?;
            let properties = domains
                .iter()
                .map(|domain| domain.name.clone())
                .zip(permutation.assignment)
                .collect();
            Ok(StateEntry::new(identifier, properties, meta))
        })
        .collect()
}

/// Pick the codecs to install, failing for permutable blocks without both
fn resolve_codecs(
    registration: &BlockRegistration,
    block: &Arc<dyn Block>,
    permutable: bool,
) -> RegistryResult<(Arc<dyn StateEncoder>, Arc<dyn StateDecoder>)> {
    let missing = |what: &'static str| RegistryError::MissingCodec {
        identifier: registration.identifier.clone(),
        missing: what,
    };
    if permutable {
        let encoder = registration.encoder.clone().ok_or_else(|| missing("encoder"))?;
        let decoder = registration.decoder.clone().ok_or_else(|| missing("decoder"))?;
        return Ok((encoder, decoder));
    }

    let encoder: Arc<dyn StateEncoder> = match registration.encoder.clone() {
        Some(encoder) => encoder,
        None => Arc::new(EmptyStateEncoder {
            identifier: registration.identifier.clone(),
        }),
    };
    let decoder: Arc<dyn StateDecoder> = match registration.decoder.clone() {
        Some(decoder) => decoder,
        None => Arc::new(FixedStateDecoder {
            block: Arc::clone(block),
        }),
    };
    Ok((encoder, decoder))
}

/// Build the metadata tree sent to clients for one block
fn block_metadata(
    block: &dyn Block,
    registration: &BlockRegistration,
    properties: &[BlockProperty],
    creative_info: &CreativeInventoryInfo,
) -> TagCompound {
    let mut components = block_base_components(block);
    if let Some(model) = &registration.model {
        components.merge(model_components(model));
    }

    let permutable = if properties.is_empty() {
        None
    } else {
        components.set(ON_PLAYER_PLACING, TagCompound::new().into());
        Some(permutable_metadata(properties, &block.permutations()))
    };
    assemble_block_metadata(components, permutable, creative_info)
}

/// Register one custom block type. Returns its numeric id.
pub fn register_block(ctx: &mut RegistryContext, registration: BlockRegistration) -> RegistryResult<u32> {
    let identifier = registration.identifier.clone();
    if identifier.is_empty() {
        return Err(RegistryError::validation("block identifier must not be empty"));
    }
    ensure_identifier_free(&ctx.host, &identifier)?;
    if contains_name(&ctx.palette, &identifier) {
        // built-in state names are taken too
        return Err(RegistryError::DuplicateIdentifier { identifier });
    }

    let id = ctx.allocator.allocate(&identifier)?;
    let block = registration.factory.create(id);
    validate_factory_result(&identifier, id, block.as_ref())?;
    if is_runtime_block_registered(&ctx.host.runtime_blocks, id) {
        return Err(RegistryError::DuplicateId { id });
    }

    let properties = block.block_properties();
    let permutable = !properties.is_empty();
    let (encoder, decoder) = resolve_codecs(&registration, &block, permutable)?;
    let states = if permutable {
        let domains = property_domains(&identifier, &properties)?;
        permutation_states(&identifier, &domains, ctx.config.max_permutations)?
    } else {
        vec![StateEntry::new(identifier.as_str(), Default::default(), 0)]
    };
    for state in &states {
        validate_state_entry(state)?;
    }
    ensure_palette_capacity(&ctx.palette, states.len())?;
    let item_id = block_item_id(block.as_ref())?;
    check_item_mapping(&ctx.host.item_dictionary, &identifier, item_id)?;

    let creative_info = registration.creative_info.clone().unwrap_or_else(|| CreativeInventoryInfo {
        category: ctx.config.default_creative_category,
        group: ctx.config.default_creative_group.clone(),
    });
    let metadata = block_metadata(block.as_ref(), &registration, &properties, &creative_info);

    // preconditions hold from here on
    register_runtime_block(&mut ctx.host.runtime_blocks, Arc::clone(&block))?;
    record_identifier(
        &mut ctx.host,
        IdentifierRecord {
            identifier: identifier.clone(),
            numeric_id: item_id,
            kind: TypeKind::Block,
        },
    )?;
    register_block_item(ctx, &identifier, Arc::clone(&block))?;
    ctx.blocks.string_id_to_type_id.insert(identifier.clone(), id);

    let state_count = states.len();
    for state in states {
        insert_state(&mut ctx.palette, state);
    }
    map_encoder(&mut ctx.host.serializers, block.as_ref(), encoder)?;
    map_decoder(&mut ctx.host.deserializers, &identifier, decoder)?;

    add_creative(
        &mut ctx.host.creative_inventory,
        ItemStack {
            identifier: identifier.clone(),
            item: Arc::new(BlockItem {
                identifier: identifier.clone(),
                block,
            }),
            count: 1,
        },
    );
    ctx.blocks.palette_entries.push(BlockPaletteEntry {
        identifier: identifier.clone(),
        metadata,
    });
    ctx.blocks.registered.push(RegisteredBlock { id, registration });

    log::info!(
        "Registered block '{}' with id {} ({} states)",
        identifier,
        id,
        state_count
    );
    Ok(id)
}

/// The registered instance of a custom block
pub fn get_block(ctx: &RegistryContext, identifier: &str) -> RegistryResult<Arc<dyn Block>> {
    let id = ctx
        .blocks
        .string_id_to_type_id
        .get(identifier)
        .copied()
        .or_not_registered(identifier)?;
    get_runtime_block(&ctx.host.runtime_blocks, id).or_not_registered(identifier)
}

/// Block palette entries for clients, in registration order
pub fn block_palette_entries(ctx: &RegistryContext) -> &[BlockPaletteEntry] {
    &ctx.blocks.palette_entries
}

/// Palette index of a block instance's current state
pub fn runtime_id_of(ctx: &RegistryContext, block: &dyn Block) -> RegistryResult<u32> {
    let state = serialize_block(&ctx.host.serializers, block)?;
    lookup_state_id(&ctx.palette, &state.name, &state.states).ok_or_registry(|| {
        RegistryError::UnmappedState {
            context: format!("palette state '{}' {:?}", state.name, state.states),
        }
    })
}

/// Decode the palette state at `runtime_id` back to a block instance
pub fn block_from_runtime_id(ctx: &RegistryContext, runtime_id: u32) -> RegistryResult<Arc<dyn Block>> {
    let entry = ctx
        .palette
        .states
        .get(runtime_id as usize)
        .ok_or_registry(|| RegistryError::UnmappedState {
            context: format!("runtime id {}", runtime_id),
        })?;
    let state = BlockStateData {
        name: entry.name.clone(),
        states: entry.properties.clone(),
    };
    deserialize_state(&ctx.host.deserializers, &state)
}
