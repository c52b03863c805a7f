//! Item components
//!
//! An item built from components sends them to clients as
//! `{components: {...}, item_properties: {...}}`. Components flagged as
//! properties land under `item_properties`, the rest under `components`.

use crate::host::{Item, PlayerContext};
use crate::tag::{Tag, TagCompound};
use std::fmt;
use std::sync::Arc;

/// One named item component
pub trait ItemComponent: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Value for the requesting player, or the baseline value for `None`
    fn value(&self, player: Option<&PlayerContext>) -> Tag;

    /// Written under `item_properties` rather than `components`
    fn is_property(&self) -> bool;
}

/// Lets creative-mode players break blocks with the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyCreativeItemComponent {
    pub destroy_in_creative: bool,
}

impl Default for DestroyCreativeItemComponent {
    fn default() -> Self {
        Self {
            destroy_in_creative: true,
        }
    }
}

impl ItemComponent for DestroyCreativeItemComponent {
    fn name(&self) -> &str {
        "can_destroy_in_creative"
    }

    fn value(&self, _player: Option<&PlayerContext>) -> Tag {
        Tag::Byte(self.destroy_in_creative as i8)
    }

    fn is_property(&self) -> bool {
        true
    }
}

/// Ordered components of one item
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    pub components: Vec<Arc<dyn ItemComponent>>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, component: Arc<dyn ItemComponent>) -> Self {
        self.components.push(component);
        self
    }

    /// Assemble `{components, item_properties}` for `player`
    pub fn to_tag(&self, player: Option<&PlayerContext>) -> TagCompound {
        let (properties, components): (Vec<_>, Vec<_>) =
            self.components.iter().partition(|c| c.is_property());

        let collect = |list: Vec<&Arc<dyn ItemComponent>>| {
            list.into_iter().fold(TagCompound::new(), |tag, component| {
                tag.with(component.name(), component.value(player))
            })
        };
        TagCompound::new()
            .with_compound("components", collect(components))
            .with_compound("item_properties", collect(properties))
    }
}

/// An item defined entirely by its components
#[derive(Debug, Clone)]
pub struct ComponentItem {
    pub type_id: i32,
    pub name: String,
    pub components: ComponentSet,
}

impl ComponentItem {
    pub fn new(type_id: i32, name: impl Into<String>, components: ComponentSet) -> Self {
        Self {
            type_id,
            name: name.into(),
            components,
        }
    }
}

impl Item for ComponentItem {
    fn item_type_id(&self) -> i32 {
        self.type_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self, player: Option<&PlayerContext>) -> Option<TagCompound> {
        Some(self.components.to_tag(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MaxStack;

    impl ItemComponent for MaxStack {
        fn name(&self) -> &str {
            "max_stack_size"
        }

        fn value(&self, _player: Option<&PlayerContext>) -> Tag {
            Tag::Byte(16)
        }

        fn is_property(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_destroy_creative_default() {
        let component = DestroyCreativeItemComponent::default();
        assert_eq!(component.name(), "can_destroy_in_creative");
        assert_eq!(component.value(None), Tag::Byte(1));
        assert!(component.is_property());
    }

    #[test]
    fn test_properties_split_from_components() {
        let set = ComponentSet::new()
            .with(Arc::new(MaxStack))
            .with(Arc::new(DestroyCreativeItemComponent {
                destroy_in_creative: false,
            }));
        let tag = set.to_tag(None);

        let keys: Vec<&str> = tag.keys().collect();
        assert_eq!(keys, vec!["components", "item_properties"]);
        assert_eq!(
            tag.get_compound("components").and_then(|c| c.get("max_stack_size")),
            Some(&Tag::Byte(16))
        );
        assert_eq!(
            tag.get_compound("item_properties")
                .and_then(|c| c.get("can_destroy_in_creative")),
            Some(&Tag::Byte(0))
        );
    }

    #[test]
    fn test_component_item_always_has_components() {
        let item = ComponentItem::new(42, "Wand", ComponentSet::new());
        let tag = item.components(None).expect("component item");
        assert_eq!(tag.get_compound("components").map(|c| c.len()), Some(0));
    }
}
