//! Host seams
//!
//! Capability traits a game server implements for its block and item types, plus
//! the in-process collaborators registration writes into: the runtime block
//! registry, the state serializer/deserializer maps, the creative inventory, the
//! item type dictionary and the item parser.

pub mod capabilities;
pub mod host_data;
pub mod host_operations;

pub use capabilities::{
    Block, BlockFactory, BreakInfo, Item, PlayerContext, StateDecoder, StateEncoder,
};
pub use host_data::{
    BlockItem, BlockStateData, CreativeInventory, HostData, IdentifierRecord, ItemParser,
    ItemStack, ItemTypeDictionary, RuntimeBlockRegistry, SavedItemData, StateDeserializerMap,
    StateSerializerMap, TypeKind,
};
pub use host_operations::*;
