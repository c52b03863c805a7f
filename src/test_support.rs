//! Shared fixtures for unit tests

use crate::block::BlockProperty;
use crate::error::{RegistryError, RegistryResult};
use crate::host::{Block, BlockFactory, BlockStateData, Item, PlayerContext};
use crate::palette::{PropertyValue, StateProperties};
use crate::tag::TagCompound;
use std::any::Any;
use std::sync::Arc;

/// Block with every attribute left at its default
#[derive(Debug, Clone)]
pub struct PlainBlock {
    pub id: u32,
    pub name: String,
}

impl Block for PlainBlock {
    fn block_type_id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn plain_block(id: u32, name: &str) -> Arc<dyn Block> {
    Arc::new(PlainBlock {
        id,
        name: name.to_string(),
    })
}

pub fn plain_factory(name: &str) -> Arc<dyn BlockFactory> {
    let name = name.to_string();
    Arc::new(move |id: u32| -> Arc<dyn Block> { plain_block(id, &name) })
}

/// Lamp with a `power` property of 0..=3
#[derive(Debug, Clone)]
pub struct PowerBlock {
    pub id: u32,
    pub power: i32,
}

impl Block for PowerBlock {
    fn block_type_id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        "Power Block"
    }

    fn light_level(&self) -> u8 {
        self.power as u8
    }

    fn block_properties(&self) -> Vec<BlockProperty> {
        vec![BlockProperty::int_range("power", 3)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub const POWER_BLOCK: &str = "ns:test_block";

pub fn power_factory() -> Arc<dyn BlockFactory> {
    Arc::new(|id: u32| -> Arc<dyn Block> { Arc::new(PowerBlock { id, power: 0 }) })
}

pub fn encode_power(block: &dyn Block) -> RegistryResult<BlockStateData> {
    let power = block
        .as_any()
        .downcast_ref::<PowerBlock>()
        .map(|b| b.power)
        .ok_or_else(|| RegistryError::validation("not a power block"))?;
    let mut states = StateProperties::new();
    states.insert("power".to_string(), PropertyValue::Int(power));
    Ok(BlockStateData {
        name: POWER_BLOCK.to_string(),
        states,
    })
}

/// Decoder for power blocks registered under `id`
pub fn power_decoder(id: u32) -> impl Fn(&BlockStateData) -> RegistryResult<Arc<dyn Block>> + Send + Sync {
    move |state: &BlockStateData| -> RegistryResult<Arc<dyn Block>> {
        match state.states.get("power") {
            Some(PropertyValue::Int(power)) => Ok(Arc::new(PowerBlock { id, power: *power })),
            _ => Err(RegistryError::validation("power state missing")),
        }
    }
}

/// Block whose `power` property lists the value 0 twice
#[derive(Debug, Clone)]
pub struct RepeatedValueBlock {
    pub id: u32,
}

impl Block for RepeatedValueBlock {
    fn block_type_id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        "Repeated Value Block"
    }

    fn block_properties(&self) -> Vec<BlockProperty> {
        vec![BlockProperty::new(
            "power",
            vec![PropertyValue::Int(0), PropertyValue::Int(0)],
        )]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn repeated_value_factory() -> Arc<dyn BlockFactory> {
    Arc::new(|id: u32| -> Arc<dyn Block> { Arc::new(RepeatedValueBlock { id }) })
}

/// Item with optional player-dependent components
#[derive(Debug, Clone)]
pub struct TestItem {
    pub id: i32,
    pub name: String,
    /// When set, `ns:allowed` reports whether the player holds this permission
    pub permission: Option<String>,
}

impl TestItem {
    pub fn plain(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            permission: None,
        }
    }

    pub fn permission_gated(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            permission: Some("ns.wand".to_string()),
        }
    }
}

impl Item for TestItem {
    fn item_type_id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self, player: Option<&PlayerContext>) -> Option<TagCompound> {
        let permission = self.permission.as_deref()?;
        let allowed = player.map_or(false, |p| p.has_permission(permission));
        Some(TagCompound::new().with_compound(
            "components",
            TagCompound::new().with_byte("ns:allowed", allowed as i8),
        ))
    }
}
