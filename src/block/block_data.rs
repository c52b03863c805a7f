//! Block Data - Pure DOP
//!
//! Block registration inputs and descriptors. No transformations here;
//! see block_operations.rs and the metadata module.

use crate::host::{BlockFactory, StateDecoder, StateEncoder};
use crate::palette::PropertyValue;
use crate::tag::TagCompound;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A declared block property and every value it may take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockProperty {
    pub name: String,
    pub values: Vec<PropertyValue>,
}

impl BlockProperty {
    pub fn new(name: impl Into<String>, values: Vec<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Integer property covering `0..=max`
    pub fn int_range(name: impl Into<String>, max: i32) -> Self {
        Self::new(name, (0..=max).map(PropertyValue::Int).collect())
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, vec![PropertyValue::Bool(false), PropertyValue::Bool(true)])
    }
}

/// Component overrides applied while a molang condition holds
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPermutation {
    pub condition: String,
    pub components: TagCompound,
}

/// Creative menu tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativeCategory {
    All,
    Construction,
    Nature,
    Equipment,
    Items,
    None,
}

impl CreativeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreativeCategory::All => "all",
            CreativeCategory::Construction => "construction",
            CreativeCategory::Nature => "nature",
            CreativeCategory::Equipment => "equipment",
            CreativeCategory::Items => "items",
            CreativeCategory::None => "none",
        }
    }
}

/// Where a block shows up in the creative menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeInventoryInfo {
    pub category: CreativeCategory,
    /// Expandable group inside the category, empty for none
    pub group: String,
}

/// How a material is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMethod {
    Opaque,
    AlphaTest,
    Blend,
    DoubleSided,
}

impl RenderMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMethod::Opaque => "opaque",
            RenderMethod::AlphaTest => "alpha_test",
            RenderMethod::Blend => "blend",
            RenderMethod::DoubleSided => "double_sided",
        }
    }
}

/// Texture binding for one face target ("*", "up", "north", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub target: String,
    pub texture: String,
    pub render_method: RenderMethod,
    pub face_dimming: bool,
    pub ambient_occlusion: bool,
}

impl Material {
    pub fn new(target: impl Into<String>, texture: impl Into<String>, render_method: RenderMethod) -> Self {
        Self {
            target: target.into(),
            texture: texture.into(),
            render_method,
            face_dimming: true,
            ambient_occlusion: true,
        }
    }
}

/// Default box origin, in pixels relative to the block's bottom center
pub const DEFAULT_BOX_ORIGIN: [f32; 3] = [-8.0, 0.0, -8.0];
/// Default box size, one full block
pub const DEFAULT_BOX_SIZE: [f32; 3] = [16.0, 16.0, 16.0];

/// Geometry, materials and collision of a custom block.
///
/// Origin and size must stay within (-8, 0, -8)..(8, 16, 8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub materials: Vec<Material>,
    pub geometry: String,
    pub origin: [f32; 3],
    pub size: [f32; 3],
    pub collidable: bool,
}

impl Model {
    pub fn new(materials: Vec<Material>, geometry: impl Into<String>) -> Self {
        Self {
            materials,
            geometry: geometry.into(),
            origin: DEFAULT_BOX_ORIGIN,
            size: DEFAULT_BOX_SIZE,
            collidable: true,
        }
    }
}

/// Everything needed to register one block type
#[derive(Clone)]
pub struct BlockRegistration {
    pub identifier: String,
    pub factory: Arc<dyn BlockFactory>,
    pub model: Option<Model>,
    pub creative_info: Option<CreativeInventoryInfo>,
    pub encoder: Option<Arc<dyn StateEncoder>>,
    pub decoder: Option<Arc<dyn StateDecoder>>,
}

impl BlockRegistration {
    pub fn new(identifier: impl Into<String>, factory: Arc<dyn BlockFactory>) -> Self {
        Self {
            identifier: identifier.into(),
            factory,
            model: None,
            creative_info: None,
            encoder: None,
            decoder: None,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_creative_info(mut self, info: CreativeInventoryInfo) -> Self {
        self.creative_info = Some(info);
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn StateEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn StateDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }
}

impl fmt::Debug for BlockRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistration")
            .field("identifier", &self.identifier)
            .field("model", &self.model)
            .field("creative_info", &self.creative_info)
            .field("encoder", &self.encoder.is_some())
            .field("decoder", &self.decoder.is_some())
            .finish_non_exhaustive()
    }
}

/// A block palette entry as sent to clients
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPaletteEntry {
    pub identifier: String,
    pub metadata: TagCompound,
}

/// One completed block registration, kept for worker replication
#[derive(Debug, Clone)]
pub struct RegisteredBlock {
    pub id: u32,
    pub registration: BlockRegistration,
}

/// Block-side registry state
#[derive(Debug, Default)]
pub struct BlockRegistryData {
    /// Identifier -> numeric type id
    pub string_id_to_type_id: FxHashMap<String, u32>,
    /// Per-block metadata trees, in registration order
    pub palette_entries: Vec<BlockPaletteEntry>,
    pub registered: Vec<RegisteredBlock>,
}
