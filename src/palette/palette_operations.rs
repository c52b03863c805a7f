//! Palette Operations - Pure DOP Functions
//!
//! No methods, no self, just transformations over `PaletteData`.

use super::palette_data::{
    PaletteData, PropertySignature, StateEntry, StateLookup, StateProperties,
};
use crate::error::{RegistryError, RegistryResult};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

const FNV1_64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV1_64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1 (multiply, then xor) over the bytes of `name`.
///
/// The client orders block names by this hash.
pub fn fnv1_64(name: &str) -> u64 {
    name.bytes().fold(FNV1_64_OFFSET, |hash, byte| {
        hash.wrapping_mul(FNV1_64_PRIME) ^ u64::from(byte)
    })
}

/// Compare names by their big-endian hash bytes, then by the names themselves
fn compare_names(a: &str, b: &str) -> Ordering {
    let ha = fnv1_64(a).to_be_bytes();
    let hb = fnv1_64(b).to_be_bytes();
    match ha.cmp(&hb) {
        Ordering::Equal if a != b => {
            log::warn!("FNV-1 hash collision between '{}' and '{}'", a, b);
            a.as_bytes().cmp(b.as_bytes())
        }
        ordering => ordering,
    }
}

/// Create palette data from the host's built-in states, keeping their order
pub fn create_palette(builtin: Vec<StateEntry>) -> PaletteData {
    let mut data = PaletteData::default();
    replace_states(&mut data, builtin);
    let lookup = build_lookup(&data.states);
    replace_lookup(&mut data, lookup);
    data
}

/// Reject entries the palette cannot hold
pub fn validate_state_entry(entry: &StateEntry) -> RegistryResult<()> {
    if entry.name.is_empty() {
        return Err(RegistryError::validation("block state must have a non-empty name"));
    }
    if let Some(key) = entry.properties.keys().find(|key| key.is_empty()) {
        return Err(RegistryError::validation(format!(
            "block state '{}' has an unnamed property '{}'",
            entry.name, key
        )));
    }
    Ok(())
}

/// Insert `entry` at its client-mandated position and rebuild the lookup.
///
/// States are grouped by name, keeping each group's existing order, with the new
/// entry appended to its own group. Groups are then ordered by the FNV-1 hash of
/// their name and flattened back into one sequence.
pub fn insert_state(data: &mut PaletteData, entry: StateEntry) {
    let key = (entry.name.clone(), PropertySignature::of(&entry.properties));

    let mut groups: IndexMap<String, Vec<StateEntry>> = IndexMap::new();
    for state in data.states.drain(..) {
        groups.entry(state.name.clone()).or_default().push(state);
    }
    groups.entry(entry.name.clone()).or_default().push(entry);

    // stable, so a (theoretical) full tie keeps first-seen order
    groups.sort_by(|a, _, b, _| compare_names(a, b));

    let sorted: Vec<StateEntry> = groups.into_values().flatten().collect();
    replace_states(data, sorted);
    let lookup = build_lookup(&data.states);
    replace_lookup(data, lookup);
    data.custom_keys.push(key);

    log::debug!(
        "Palette rebuilt: {} states, {} names",
        data.states.len(),
        data.lookup.len()
    );
}

/// Most states a palette may hold; runtime indices are `u32`
pub const MAX_PALETTE_STATES: usize = u32::MAX as usize;

/// Fail unless `additional` more states fit under `MAX_PALETTE_STATES`
pub fn ensure_palette_capacity(data: &PaletteData, additional: usize) -> RegistryResult<()> {
    let fits = data
        .states
        .len()
        .checked_add(additional)
        .map_or(false, |total| total <= MAX_PALETTE_STATES);
    if !fits {
        return Err(RegistryError::validation(format!(
            "palette of {} states cannot take {} more (max {})",
            data.states.len(),
            additional,
            MAX_PALETTE_STATES
        )));
    }
    Ok(())
}

/// Whether any state, built-in or custom, is named `name`
pub fn contains_name(data: &PaletteData, name: &str) -> bool {
    data.lookup.contains_key(name)
}

/// Replace the canonical state sequence, renumbering every entry.
///
/// Callers keep the palette within `MAX_PALETTE_STATES`
/// (see `ensure_palette_capacity`).
pub fn replace_states(data: &mut PaletteData, states: Vec<StateEntry>) {
    data.states = states;
    for (state, index) in data.states.iter_mut().zip(0u32..) {
        state.runtime_index = index;
    }
}

/// Replace the lookup cache
pub fn replace_lookup(data: &mut PaletteData, lookup: FxHashMap<String, StateLookup>) {
    data.lookup = lookup;
}

/// Derive the name -> properties -> index lookup from a state sequence
pub fn build_lookup(states: &[StateEntry]) -> FxHashMap<String, StateLookup> {
    let mut table: FxHashMap<String, FxHashMap<PropertySignature, u32>> = FxHashMap::default();
    for (state, index) in states.iter().zip(0u32..) {
        table
            .entry(state.name.clone())
            .or_default()
            .insert(PropertySignature::of(&state.properties), index);
    }

    table
        .into_iter()
        .map(|(name, by_properties)| {
            let lookup = if by_properties.len() == 1 {
                match by_properties.values().next() {
                    Some(&index) => StateLookup::Single(index),
                    None => StateLookup::ByProperties(by_properties),
                }
            } else {
                StateLookup::ByProperties(by_properties)
            };
            (name, lookup)
        })
        .collect()
}

/// Resolve a concrete state to its runtime index.
///
/// Names with a single state take the fast path and ignore `properties`.
pub fn lookup_state_id(data: &PaletteData, name: &str, properties: &StateProperties) -> Option<u32> {
    match data.lookup.get(name)? {
        StateLookup::Single(index) => Some(*index),
        StateLookup::ByProperties(by_properties) => by_properties
            .get(&PropertySignature::of(properties))
            .copied(),
    }
}

/// Every state, in canonical order
pub fn all_states(data: &PaletteData) -> &[StateEntry] {
    &data.states
}

/// States inserted through `insert_state`, in insertion order, with current indices
pub fn custom_states(data: &PaletteData) -> Vec<&StateEntry> {
    data.custom_keys
        .iter()
        .filter_map(|(name, signature)| {
            let index = match data.lookup.get(name)? {
                StateLookup::Single(index) => *index,
                StateLookup::ByProperties(by_properties) => *by_properties.get(signature)?,
            };
            data.states.get(index as usize)
        })
        .collect()
}
