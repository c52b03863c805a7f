//! State Palette
//!
//! The ordered, client-visible list of every block state plus the lookup cache
//! that maps a concrete state back to its runtime index.

pub mod palette_data;
pub mod palette_operations;

pub use palette_data::{
    PaletteData, PropertySignature, PropertyValue, StateEntry, StateLookup, StateProperties,
};
pub use palette_operations::{
    all_states, build_lookup, contains_name, create_palette, custom_states,
    ensure_palette_capacity, fnv1_64, insert_state, lookup_state_id, replace_lookup,
    replace_states, validate_state_entry, MAX_PALETTE_STATES,
};
