//! Metadata tree sent to clients
//!
//! A typed tree of named values. The binary encoder lives in the protocol layer;
//! this crate only builds trees and hands them over verbatim, so compound field
//! order is preserved exactly as written.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of the metadata tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Byte(i8),
    Int(i32),
    Float(f32),
    String(String),
    List(Vec<Tag>),
    Compound(TagCompound),
}

/// Named children, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCompound(IndexMap<String, Tag>);

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a child, replacing any previous value under `name` in place
    pub fn set(&mut self, name: impl Into<String>, tag: Tag) -> &mut Self {
        self.0.insert(name.into(), tag);
        self
    }

    pub fn with(mut self, name: impl Into<String>, tag: Tag) -> Self {
        self.set(name, tag);
        self
    }

    pub fn with_byte(self, name: impl Into<String>, value: i8) -> Self {
        self.with(name, Tag::Byte(value))
    }

    pub fn with_int(self, name: impl Into<String>, value: i32) -> Self {
        self.with(name, Tag::Int(value))
    }

    pub fn with_float(self, name: impl Into<String>, value: f32) -> Self {
        self.with(name, Tag::Float(value))
    }

    pub fn with_string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, Tag::String(value.into()))
    }

    pub fn with_list(self, name: impl Into<String>, values: Vec<Tag>) -> Self {
        self.with(name, Tag::List(values))
    }

    pub fn with_compound(self, name: impl Into<String>, value: TagCompound) -> Self {
        self.with(name, Tag::Compound(value))
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn get_compound(&self, name: &str) -> Option<&TagCompound> {
        match self.0.get(name) {
            Some(Tag::Compound(compound)) => Some(compound),
            _ => None,
        }
    }

    pub fn get_list(&self, name: &str) -> Option<&[Tag]> {
        match self.0.get(name) {
            Some(Tag::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Copy every child of `other` into `self`, overwriting same-named children
    pub fn merge(&mut self, other: TagCompound) {
        for (name, tag) in other.0 {
            self.0.insert(name, tag);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.0.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<TagCompound> for Tag {
    fn from(compound: TagCompound) -> Self {
        Tag::Compound(compound)
    }
}

/// Three floats as a list, the shape used for box origins and sizes
pub fn vec3_tag(v: [f32; 3]) -> Tag {
    Tag::List(v.iter().map(|&c| Tag::Float(c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut tag = TagCompound::new()
            .with_int("a", 1)
            .with_int("b", 2)
            .with_int("c", 3);
        tag.set("b", Tag::String("two".to_string()));

        let keys: Vec<&str> = tag.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(tag.get("b"), Some(&Tag::String("two".to_string())));
    }

    #[test]
    fn test_merge_overwrites_and_appends() {
        let mut base = TagCompound::new().with_byte("x", 1).with_byte("y", 2);
        base.merge(TagCompound::new().with_byte("y", 5).with_byte("z", 3));

        let keys: Vec<&str> = base.keys().collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
        assert_eq!(base.get("y"), Some(&Tag::Byte(5)));
    }

    #[test]
    fn test_typed_getters() {
        let tag = TagCompound::new()
            .with_compound("inner", TagCompound::new().with_float("value", 0.5))
            .with_list("list", vec![Tag::Int(1)]);

        assert!(tag.get_compound("inner").is_some());
        assert!(tag.get_compound("list").is_none());
        assert_eq!(tag.get_list("list").map(|l| l.len()), Some(1));
    }
}
