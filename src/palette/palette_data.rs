//! Palette Data - Pure DOP
//!
//! NO METHODS beyond trivial constructors. Just data.
//! All transformations happen in palette_operations.rs

use crate::tag::Tag;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single block state property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    String(String),
}

impl PropertyValue {
    /// Tree representation: bools travel as bytes
    pub fn to_tag(&self) -> Tag {
        match self {
            PropertyValue::Bool(b) => Tag::Byte(*b as i8),
            PropertyValue::Int(i) => Tag::Int(*i),
            PropertyValue::String(s) => Tag::String(s.clone()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

/// Property assignment of one state. Order is significant and sent verbatim.
pub type StateProperties = IndexMap<String, PropertyValue>;

/// One concrete (name, property assignment) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub name: String,
    pub properties: StateProperties,
    /// Block data value this state was inserted with
    pub meta: u16,
    /// Position in the palette, rewritten on every rebuild
    pub runtime_index: u32,
}

impl StateEntry {
    pub fn new(name: impl Into<String>, properties: StateProperties, meta: u16) -> Self {
        Self {
            name: name.into(),
            properties,
            meta,
            runtime_index: 0,
        }
    }
}

/// Exact ordered property assignment, used as an opaque lookup key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertySignature(pub Vec<(String, PropertyValue)>);

impl PropertySignature {
    pub fn of(properties: &StateProperties) -> Self {
        PropertySignature(
            properties
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }
}

/// Lookup entry for one block name
#[derive(Debug, Clone, PartialEq)]
pub enum StateLookup {
    /// Fast path for names with exactly one state
    Single(u32),
    ByProperties(FxHashMap<PropertySignature, u32>),
}

/// Palette data: canonical state order plus derived lookup
#[derive(Debug, Clone, Default)]
pub struct PaletteData {
    /// Canonical order; `states[i].runtime_index == i`
    pub states: Vec<StateEntry>,
    /// Always exactly derivable from `states`
    pub lookup: FxHashMap<String, StateLookup>,
    /// States inserted by this crate, in insertion order
    pub custom_keys: Vec<(String, PropertySignature)>,
}
