//! Metadata Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return trees, no side effects.

use crate::block::{BlockPermutation, BlockProperty, CreativeInventoryInfo, Material, Model};
use crate::host::Block;
use crate::tag::{vec3_tag, Tag, TagCompound};

/// Molang version stamped on every block this crate emits
pub const MOLANG_VERSION: i32 = 1;

/// Component hint that lets clients predict placement
pub const ON_PLAYER_PLACING: &str = "minecraft:on_player_placing";

/// Light, hardness, friction and flammability components
pub fn block_base_components(block: &dyn Block) -> TagCompound {
    let break_info = block.break_info();
    TagCompound::new()
        .with_compound(
            "minecraft:light_emission",
            TagCompound::new().with_byte("emission", block.light_level() as i8),
        )
        .with_compound(
            "minecraft:block_light_filter",
            TagCompound::new().with_byte("lightLevel", block.light_filter() as i8),
        )
        .with_compound(
            "minecraft:destructible_by_mining",
            TagCompound::new().with_float("value", break_info.hardness),
        )
        .with_compound(
            "minecraft:destructible_by_explosion",
            TagCompound::new().with_float("value", break_info.blast_resistance),
        )
        .with_compound(
            "minecraft:friction",
            TagCompound::new().with_float("value", block.friction()),
        )
        .with_compound(
            "minecraft:flammable",
            TagCompound::new()
                .with_int("catch_chance_modifier", block.flame_encouragement())
                .with_int("destroy_chance_modifier", block.flammability()),
        )
}

pub fn material_tag(material: &Material) -> TagCompound {
    TagCompound::new()
        .with_string("texture", material.texture.as_str())
        .with_string("render_method", material.render_method.as_str())
        .with_byte("face_dimming", material.face_dimming as i8)
        .with_byte("ambient_occlusion", material.ambient_occlusion as i8)
}

fn box_tag(model: &Model) -> Tag {
    if !model.collidable {
        // disabled marker
        return Tag::Byte(0);
    }
    TagCompound::new()
        .with_byte("enabled", 1)
        .with("origin", vec3_tag(model.origin))
        .with("size", vec3_tag(model.size))
        .into()
}

/// Material, geometry, collision and selection components of a model
pub fn model_components(model: &Model) -> TagCompound {
    let materials = model
        .materials
        .iter()
        .fold(TagCompound::new(), |materials, material| {
            materials.with_compound(material.target.as_str(), material_tag(material))
        });

    TagCompound::new()
        .with_compound(
            "minecraft:material_instances",
            TagCompound::new()
                // clients crash without it, even empty
                .with_compound("mappings", TagCompound::new())
                .with_compound("materials", materials),
        )
        .with_compound(
            "minecraft:geometry",
            TagCompound::new().with_string("value", model.geometry.as_str()),
        )
        .with("minecraft:collision_box", box_tag(model))
        .with("minecraft:selection_box", box_tag(model))
}

/// `{name, enum: [values]}`
pub fn property_descriptor(property: &BlockProperty) -> Tag {
    TagCompound::new()
        .with_string("name", property.name.as_str())
        .with_list("enum", property.values.iter().map(|v| v.to_tag()).collect())
        .into()
}

/// `{condition, components}`
pub fn permutation_descriptor(permutation: &BlockPermutation) -> Tag {
    TagCompound::new()
        .with_string("condition", permutation.condition.as_str())
        .with_compound("components", permutation.components.clone())
        .into()
}

pub fn creative_category_tag(info: &CreativeInventoryInfo) -> TagCompound {
    TagCompound::new()
        .with_string("category", info.category.as_str())
        .with_string("group", info.group.as_str())
}

/// Permutation-related parts of a block's metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PermutableMetadata {
    /// In declared order
    pub permutations: Vec<Tag>,
    /// In declared order; reversed when written
    pub properties: Vec<Tag>,
}

pub fn permutable_metadata(properties: &[BlockProperty], permutations: &[BlockPermutation]) -> PermutableMetadata {
    PermutableMetadata {
        permutations: permutations.iter().map(permutation_descriptor).collect(),
        properties: properties.iter().map(property_descriptor).collect(),
    }
}

/// Assemble the final per-block tree.
///
/// Layout: `permutations`, `properties` (permutable only), `components`,
/// `menu_category`, `molangVersion`. The creative category is also written
/// into `components`.
pub fn assemble_block_metadata(
    mut components: TagCompound,
    permutable: Option<PermutableMetadata>,
    creative_info: &CreativeInventoryInfo,
) -> TagCompound {
    let mut metadata = TagCompound::new();
    if let Some(permutable) = permutable {
        let mut properties = permutable.properties;
        // clients read properties back to front
        properties.reverse();
        metadata.set("permutations", Tag::List(permutable.permutations));
        metadata.set("properties", Tag::List(properties));
    }

    components.set(
        "minecraft:creative_category",
        creative_category_tag(creative_info).into(),
    );
    metadata
        .with_compound("components", components)
        .with_compound("menu_category", creative_category_tag(creative_info))
        .with_int("molangVersion", MOLANG_VERSION)
}

/// Item component descriptor: the item's components tagged with id and identifier
pub fn item_component_descriptor(components: TagCompound, id: i32, identifier: &str) -> TagCompound {
    components.with_int("id", id).with_string("name", identifier)
}
