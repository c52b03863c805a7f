//! Registry context
//!
//! One `RegistryContext` owns every table registration touches: the id
//! allocator, the state palette, the host collaborators, and the block and item
//! registries. It is created once at startup and passed explicitly down the
//! registration call chain.

use crate::allocator::{create_allocator, load_allocator, IdAllocator};
use crate::block::BlockRegistryData;
use crate::config::{validate_config, RegistryConfig};
use crate::error::RegistryResult;
use crate::host::HostData;
use crate::item::ItemRegistryData;
use crate::palette::{create_palette, PaletteData, StateEntry};
use std::fmt;

/// Everything the registration pipelines read and write
pub struct RegistryContext {
    pub config: RegistryConfig,
    /// States the host supplied at startup, kept for worker snapshots
    pub builtin_states: Vec<StateEntry>,
    pub allocator: Box<dyn IdAllocator>,
    pub palette: PaletteData,
    pub host: HostData,
    pub blocks: BlockRegistryData,
    pub items: ItemRegistryData,
}

impl fmt::Debug for RegistryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryContext")
            .field("config", &self.config)
            .field("palette_states", &self.palette.states.len())
            .field("host", &self.host)
            .field("blocks", &self.blocks.registered.len())
            .field("items", &self.items.registered.len())
            .finish_non_exhaustive()
    }
}

/// Create a context over the host's built-in states.
///
/// Uses the persistent id cache when `config.id_cache_path` is set.
pub fn create_registry_context(
    config: RegistryConfig,
    builtin_states: Vec<StateEntry>,
) -> RegistryResult<RegistryContext> {
    validate_config(&config)?;
    let allocator: Box<dyn IdAllocator> = match &config.id_cache_path {
        Some(path) => Box::new(load_allocator(
            path,
            config.first_block_id,
            config.last_block_id,
        )?),
        None => Box::new(create_allocator(config.first_block_id, config.last_block_id)),
    };
    create_registry_context_with_allocator(config, builtin_states, allocator)
}

/// Create a context around a caller-supplied allocator
pub fn create_registry_context_with_allocator(
    config: RegistryConfig,
    builtin_states: Vec<StateEntry>,
    allocator: Box<dyn IdAllocator>,
) -> RegistryResult<RegistryContext> {
    validate_config(&config)?;
    log::info!(
        "Registry context created with {} built-in states, ids {}..={}",
        builtin_states.len(),
        config.first_block_id,
        config.last_block_id
    );

    Ok(RegistryContext {
        config,
        palette: create_palette(builtin_states.clone()),
        builtin_states,
        allocator,
        host: HostData::default(),
        blocks: BlockRegistryData::default(),
        items: ItemRegistryData::default(),
    })
}

/// Flush allocated ids so the next run hands out the same ones
pub fn persist_ids(ctx: &RegistryContext) -> RegistryResult<()> {
    ctx.allocator.persist()
}
