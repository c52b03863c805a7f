// Hearth Registry - Data-Oriented Programming (DOP) Architecture
//
// Registers custom block and item types at server startup and keeps every
// client-facing structure consistent with them:
// - palette: hash-ordered block state list plus its lookup cache
// - block / item: registration pipelines writing into the host tables
// - metadata: protocol metadata trees for registered types
// - worker: one-shot snapshot replication to worker threads
//
// State lives in plain data structs; behaviour lives in *_operations modules
// as free functions. One RegistryContext is created at startup and passed
// explicitly to every pipeline.

// Ambient
pub mod config;
pub mod error;
pub mod logging;

// Core data
pub mod palette;
pub mod permutation;
pub mod tag;

// Collaborators
pub mod allocator;
pub mod host;

// Pipelines
pub mod block;
pub mod context;
pub mod item;
pub mod metadata;
pub mod worker;

#[cfg(test)]
mod test_support;

pub use config::{load_config, parse_config, validate_config, RegistryConfig};
pub use context::{
    create_registry_context, create_registry_context_with_allocator, persist_ids,
    RegistryContext,
};
pub use error::{OptionExt, RegistryError, RegistryResult};
pub use logging::init_logging;

pub use block::{
    block_from_runtime_id, block_palette_entries, get_block, register_block, runtime_id_of,
    BlockPaletteEntry, BlockPermutation, BlockProperty, BlockRegistration, CreativeCategory,
    CreativeInventoryInfo, Material, Model, RenderMethod,
};
pub use host::{
    Block, BlockFactory, BlockStateData, BreakInfo, Item, ItemStack, PlayerContext,
    StateDecoder, StateEncoder,
};
pub use item::{
    get_item, item_component_entries, item_table_entries, regenerate_item_components,
    register_block_item, register_item, ComponentItem, ComponentSet,
    DestroyCreativeItemComponent, ItemComponent, ItemComponentEntry, ItemTypeEntry,
};
pub use palette::{PropertyValue, StateEntry, StateProperties};
pub use tag::{Tag, TagCompound};
pub use worker::{shutdown_worker, spawn_worker, submit_job, take_snapshot, RegistrySnapshot};
