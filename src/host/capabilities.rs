//! Capability traits implemented per block/item type
//!
//! A block type supplies a `BlockFactory` to build instances for an allocated id
//! and, when it has per-state data, a `StateEncoder`/`StateDecoder` pair to move
//! between instances and wire states.

use super::host_data::BlockStateData;
use crate::block::{BlockPermutation, BlockProperty};
use crate::error::RegistryResult;
use crate::tag::TagCompound;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Mining and explosion resistance of a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakInfo {
    pub hardness: f32,
    pub blast_resistance: f32,
}

impl BreakInfo {
    /// Blast resistance defaults to five times the hardness
    pub fn new(hardness: f32) -> Self {
        Self {
            hardness,
            blast_resistance: hardness * 5.0,
        }
    }

    pub fn instant() -> Self {
        Self::new(0.0)
    }
}

/// A block instance as the host sees it
pub trait Block: Send + Sync + fmt::Debug {
    /// Numeric type id this instance was built for
    fn block_type_id(&self) -> u32;

    fn name(&self) -> &str;

    /// Light emitted, 0-15
    fn light_level(&self) -> u8 {
        0
    }

    /// Light absorbed, 0-15
    fn light_filter(&self) -> u8 {
        15
    }

    fn break_info(&self) -> BreakInfo {
        BreakInfo::new(1.0)
    }

    fn friction(&self) -> f32 {
        0.6
    }

    /// Chance modifier for catching fire
    fn flame_encouragement(&self) -> i32 {
        0
    }

    /// Chance modifier for burning away
    fn flammability(&self) -> i32 {
        0
    }

    /// Declared properties. A non-empty list makes the block permutable.
    fn block_properties(&self) -> Vec<BlockProperty> {
        Vec::new()
    }

    /// Conditional component overrides sent alongside the properties
    fn permutations(&self) -> Vec<BlockPermutation> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Builds a block instance for an allocated numeric id
pub trait BlockFactory: Send + Sync {
    fn create(&self, id: u32) -> Arc<dyn Block>;
}

impl<F> BlockFactory for F
where
    F: Fn(u32) -> Arc<dyn Block> + Send + Sync,
{
    fn create(&self, id: u32) -> Arc<dyn Block> {
        self(id)
    }
}

/// Converts a block instance to its wire state
pub trait StateEncoder: Send + Sync {
    fn encode(&self, block: &dyn Block) -> RegistryResult<BlockStateData>;
}

impl<F> StateEncoder for F
where
    F: Fn(&dyn Block) -> RegistryResult<BlockStateData> + Send + Sync,
{
    fn encode(&self, block: &dyn Block) -> RegistryResult<BlockStateData> {
        self(block)
    }
}

/// Converts a wire state back to a block instance
pub trait StateDecoder: Send + Sync {
    fn decode(&self, state: &BlockStateData) -> RegistryResult<Arc<dyn Block>>;
}

impl<F> StateDecoder for F
where
    F: Fn(&BlockStateData) -> RegistryResult<Arc<dyn Block>> + Send + Sync,
{
    fn decode(&self, state: &BlockStateData) -> RegistryResult<Arc<dyn Block>> {
        self(state)
    }
}

/// What component generation may know about the requesting player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerContext {
    pub username: String,
    pub creative: bool,
    pub permissions: Vec<String>,
}

impl PlayerContext {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// An item type as the host sees it
pub trait Item: Send + Sync + fmt::Debug {
    /// Numeric type id, already allocated by the host (or by the block pipeline)
    fn item_type_id(&self) -> i32;

    fn name(&self) -> &str;

    /// Component tree, or `None` for items without components.
    ///
    /// Called with `None` once at registration for the cached baseline and again
    /// with a player whenever per-player views are regenerated.
    fn components(&self, player: Option<&PlayerContext>) -> Option<TagCompound> {
        let _ = player;
        None
    }
}
