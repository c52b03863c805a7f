//! Block Registration Pipeline
//!
//! Allocates a numeric id for a custom block, instantiates it, expands its
//! property space into palette states, assembles its metadata tree and wires
//! its state codecs into the host.

pub mod block_data;
pub mod block_operations;
pub mod default_codecs;

#[cfg(test)]
mod tests;

pub use block_data::{
    BlockPaletteEntry, BlockPermutation, BlockProperty, BlockRegistration, BlockRegistryData,
    CreativeCategory, CreativeInventoryInfo, Material, Model, RegisteredBlock, RenderMethod,
    DEFAULT_BOX_ORIGIN, DEFAULT_BOX_SIZE,
};
pub use block_operations::*;
pub use default_codecs::{EmptyStateEncoder, FixedStateDecoder};
