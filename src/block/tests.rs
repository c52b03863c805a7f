//! End-to-end registration scenarios

use super::*;
use crate::config::RegistryConfig;
use crate::context::{create_registry_context, RegistryContext};
use crate::error::RegistryError;
use crate::host::{
    identifier_of, register_runtime_block, serialize_block, Block, StateEncoder,
};
use crate::item::{get_item, item_table_entries};
use crate::palette::{all_states, custom_states, lookup_state_id, PropertyValue, StateEntry};
use crate::tag::Tag;
use crate::test_support::{
    encode_power, plain_block, plain_factory, power_decoder, power_factory,
    repeated_value_factory, PowerBlock, POWER_BLOCK,
};
use std::sync::Arc;

const FIRST_ID: u32 = 10_000;

fn context() -> RegistryContext {
    let builtin = vec![
        StateEntry::new("minecraft:air", Default::default(), 0),
        StateEntry::new("minecraft:stone", Default::default(), 0),
    ];
    create_registry_context(RegistryConfig::default(), builtin).expect("context")
}

/// Every state's lookup resolves back to its own runtime index
fn assert_lookup_consistent(ctx: &RegistryContext) {
    for state in all_states(&ctx.palette) {
        assert_eq!(
            lookup_state_id(&ctx.palette, &state.name, &state.properties),
            Some(state.runtime_index),
            "state {} at {}",
            state.name,
            state.runtime_index
        );
    }
}

fn power_registration() -> BlockRegistration {
    BlockRegistration::new(POWER_BLOCK, power_factory())
        .with_encoder(Arc::new(encode_power))
        .with_decoder(Arc::new(power_decoder(FIRST_ID)))
}

#[test]
fn test_permutable_block_end_to_end() {
    let mut ctx = context();
    let id = register_block(&mut ctx, power_registration()).expect("register");
    assert_eq!(id, FIRST_ID);

    let custom = custom_states(&ctx.palette);
    assert_eq!(custom.len(), 4);
    for (meta, state) in custom.iter().enumerate() {
        assert_eq!(state.name, POWER_BLOCK);
        assert_eq!(state.meta as usize, meta);
        assert_eq!(
            state.properties.get("power"),
            Some(&PropertyValue::Int(meta as i32))
        );
    }

    let entries = block_palette_entries(&ctx);
    assert_eq!(entries.len(), 1);
    let metadata = &entries[0].metadata;
    let properties = metadata.get_list("properties").expect("permutable");
    assert_eq!(properties.len(), 1);
    assert!(metadata
        .get_compound("components")
        .map(|c| c.contains(crate::metadata::ON_PLAYER_PLACING))
        .unwrap_or(false));
    assert_eq!(metadata.get("molangVersion"), Some(&Tag::Int(1)));
}

#[test]
fn test_palette_order_follows_name_hash() {
    let mut ctx = context();
    register_block(&mut ctx, BlockRegistration::new("ns:b", plain_factory("B"))).expect("b");
    register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("a");

    let names: Vec<&str> = all_states(&ctx.palette).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["minecraft:stone", "minecraft:air", "ns:b", "ns:a"]);

    // custom entries keep registration order
    let custom: Vec<&str> = custom_states(&ctx.palette).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(custom, vec!["ns:b", "ns:a"]);
    let palette: Vec<&str> = block_palette_entries(&ctx)
        .iter()
        .map(|e| e.identifier.as_str())
        .collect();
    assert_eq!(palette, custom);
}

#[test]
fn test_duplicate_identifier_keeps_first() {
    let mut ctx = context();
    register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("first");
    let states_before = all_states(&ctx.palette).len();

    let result = register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("Other")));
    assert!(matches!(result, Err(RegistryError::DuplicateIdentifier { .. })));
    assert_eq!(all_states(&ctx.palette).len(), states_before);
    assert_eq!(block_palette_entries(&ctx).len(), 1);
    assert_eq!(
        get_block(&ctx, "ns:a").map(|b| b.name().to_string()).ok(),
        Some("A".to_string())
    );
}

#[test]
fn test_missing_codec_leaves_palette_untouched() {
    let mut ctx = context();
    let before = all_states(&ctx.palette).to_vec();

    let no_decoder = BlockRegistration::new(POWER_BLOCK, power_factory())
        .with_encoder(Arc::new(encode_power));
    let result = register_block(&mut ctx, no_decoder);
    assert!(matches!(
        result,
        Err(RegistryError::MissingCodec { missing: "decoder", .. })
    ));

    let no_codecs = BlockRegistration::new(POWER_BLOCK, power_factory());
    assert!(matches!(
        register_block(&mut ctx, no_codecs),
        Err(RegistryError::MissingCodec { missing: "encoder", .. })
    ));

    assert_eq!(all_states(&ctx.palette), before.as_slice());
    assert!(block_palette_entries(&ctx).is_empty());
    assert!(get_block(&ctx, POWER_BLOCK).is_err());
}

#[test]
fn test_default_codecs_for_plain_block() {
    let mut ctx = context();
    register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("register");

    let block = get_block(&ctx, "ns:a").expect("registered");
    let state = serialize_block(&ctx.host.serializers, block.as_ref()).expect("default encoder");
    assert_eq!(state.name, "ns:a");
    assert!(state.states.is_empty());

    let runtime_id = runtime_id_of(&ctx, block.as_ref()).expect("in palette");
    assert_eq!(all_states(&ctx.palette)[runtime_id as usize].name, "ns:a");
    let decoded = block_from_runtime_id(&ctx, runtime_id).expect("default decoder");
    assert_eq!(decoded.block_type_id(), block.block_type_id());
}

#[test]
fn test_runtime_ids_resolve_per_state() {
    let mut ctx = context();
    register_block(&mut ctx, power_registration()).expect("register");

    let lit = PowerBlock { id: FIRST_ID, power: 2 };
    let runtime_id = runtime_id_of(&ctx, &lit).expect("state in palette");
    let entry = &all_states(&ctx.palette)[runtime_id as usize];
    assert_eq!(entry.properties.get("power"), Some(&PropertyValue::Int(2)));

    let decoded = block_from_runtime_id(&ctx, runtime_id).expect("decoder");
    let decoded = decoded.as_any().downcast_ref::<PowerBlock>().map(|b| b.power);
    assert_eq!(decoded, Some(2));
}

#[test]
fn test_block_is_also_an_item() {
    let mut ctx = context();
    let id = register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("register");

    assert_eq!(identifier_of(&ctx.host.item_dictionary, id as i32), Some("ns:a"));
    assert_eq!(item_table_entries(&ctx).len(), 1);
    assert_eq!(get_item(&ctx, "ns:a", 2).map(|s| s.count).ok(), Some(2));
    assert_eq!(ctx.host.creative_inventory.stacks.len(), 1);
}

#[test]
fn test_creative_info_defaults_from_config() {
    let config = RegistryConfig {
        default_creative_category: CreativeCategory::Nature,
        default_creative_group: "itemGroup.name.leaves".to_string(),
        ..RegistryConfig::default()
    };
    let mut ctx = create_registry_context(config, Vec::new()).expect("context");
    register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("default info");
    register_block(
        &mut ctx,
        BlockRegistration::new("ns:b", plain_factory("B")).with_creative_info(CreativeInventoryInfo {
            category: CreativeCategory::Construction,
            group: String::new(),
        }),
    )
    .expect("explicit info");

    let categories: Vec<Option<&Tag>> = block_palette_entries(&ctx)
        .iter()
        .map(|e| e.metadata.get_compound("menu_category").and_then(|c| c.get("category")))
        .collect();
    assert_eq!(
        categories,
        vec![
            Some(&Tag::String("nature".to_string())),
            Some(&Tag::String("construction".to_string())),
        ]
    );
}

#[test]
fn test_model_fragments_merged() {
    let mut ctx = context();
    let model = Model::new(
        vec![Material::new("*", "ns_a", RenderMethod::AlphaTest)],
        "geometry.ns.a",
    );
    register_block(
        &mut ctx,
        BlockRegistration::new("ns:a", plain_factory("A")).with_model(model),
    )
    .expect("register");

    let components = block_palette_entries(&ctx)[0]
        .metadata
        .get_compound("components")
        .expect("components");
    assert!(components.contains("minecraft:geometry"));
    assert!(components.contains("minecraft:material_instances"));
    assert!(components.contains("minecraft:light_emission"));
}

#[test]
fn test_permutation_overflow_rejected() {
    let config = RegistryConfig {
        max_permutations: 3,
        ..RegistryConfig::default()
    };
    let mut ctx = create_registry_context(config, Vec::new()).expect("context");

    let result = register_block(&mut ctx, power_registration());
    assert!(matches!(
        result,
        Err(RegistryError::PermutationOverflow { count: 4, max: 3, .. })
    ));
    assert!(custom_states(&ctx.palette).is_empty());
}

#[test]
fn test_factory_must_build_allocated_id() {
    let mut ctx = context();
    let wrong_id = Arc::new(|_id: u32| -> Arc<dyn Block> { plain_block(1, "Wrong") });
    let result = register_block(&mut ctx, BlockRegistration::new("ns:wrong", wrong_id));
    assert!(matches!(result, Err(RegistryError::InvalidFactoryResult { .. })));
    assert!(get_block(&ctx, "ns:wrong").is_err());
}

#[test]
fn test_custom_encoder_used_for_plain_block() {
    let mut ctx = context();
    let encoder: Arc<dyn StateEncoder> = Arc::new(EmptyStateEncoder {
        identifier: "ns:alias".to_string(),
    });
    register_block(
        &mut ctx,
        BlockRegistration::new("ns:a", plain_factory("A")).with_encoder(encoder),
    )
    .expect("register");

    let block = get_block(&ctx, "ns:a").expect("registered");
    let state = serialize_block(&ctx.host.serializers, block.as_ref()).expect("encoder");
    assert_eq!(state.name, "ns:alias");
}

#[test]
fn test_builtin_name_rejected() {
    let mut ctx = context();
    let before = all_states(&ctx.palette).to_vec();

    let result = register_block(
        &mut ctx,
        BlockRegistration::new("minecraft:stone", plain_factory("Fake Stone")),
    );
    assert!(matches!(
        result,
        Err(RegistryError::DuplicateIdentifier { ref identifier }) if identifier == "minecraft:stone"
    ));
    assert_eq!(all_states(&ctx.palette), before.as_slice());
    assert!(block_palette_entries(&ctx).is_empty());
    assert!(get_block(&ctx, "minecraft:stone").is_err());
    assert_lookup_consistent(&ctx);

    // the id was never handed out
    let id = register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("a");
    assert_eq!(id, FIRST_ID);
    assert_lookup_consistent(&ctx);
}

#[test]
fn test_repeated_property_value_rejected() {
    let mut ctx = context();
    let before = all_states(&ctx.palette).to_vec();

    let registration = BlockRegistration::new("ns:repeated", repeated_value_factory())
        .with_encoder(Arc::new(encode_power))
        .with_decoder(Arc::new(power_decoder(FIRST_ID)));
    let result = register_block(&mut ctx, registration);
    assert!(matches!(result, Err(RegistryError::Validation { .. })));

    assert_eq!(all_states(&ctx.palette), before.as_slice());
    assert!(custom_states(&ctx.palette).is_empty());
    assert!(get_block(&ctx, "ns:repeated").is_err());
    assert_lookup_consistent(&ctx);
}

#[test]
fn test_lookup_consistent_after_mixed_registrations() {
    let mut ctx = context();
    register_block(&mut ctx, power_registration()).expect("power");
    register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("a");
    register_block(&mut ctx, BlockRegistration::new("ns:b", plain_factory("B"))).expect("b");
    assert_lookup_consistent(&ctx);
}

#[test]
fn test_id_range_exhausted_through_registration() {
    let config = RegistryConfig {
        first_block_id: FIRST_ID,
        last_block_id: FIRST_ID,
        ..RegistryConfig::default()
    };
    let mut ctx = create_registry_context(config, Vec::new()).expect("context");
    register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A"))).expect("only id");
    let states_before = all_states(&ctx.palette).to_vec();

    let result = register_block(&mut ctx, BlockRegistration::new("ns:b", plain_factory("B")));
    assert!(matches!(result, Err(RegistryError::AllocationExhausted { .. })));
    assert_eq!(all_states(&ctx.palette), states_before.as_slice());
    assert_eq!(block_palette_entries(&ctx).len(), 1);
    assert!(get_block(&ctx, "ns:b").is_err());
}

#[test]
fn test_runtime_id_already_taken_by_host() {
    let mut ctx = context();
    register_runtime_block(&mut ctx.host.runtime_blocks, plain_block(FIRST_ID, "Host Block"))
        .expect("host block");
    let before = all_states(&ctx.palette).to_vec();

    let result = register_block(&mut ctx, BlockRegistration::new("ns:a", plain_factory("A")));
    assert!(matches!(result, Err(RegistryError::DuplicateId { id: FIRST_ID })));
    assert_eq!(all_states(&ctx.palette), before.as_slice());
    assert!(block_palette_entries(&ctx).is_empty());
    assert!(get_block(&ctx, "ns:a").is_err());
}
