//! Identifier Allocator
//!
//! Hands out numeric ids for string identifiers. The default implementation
//! remembers every assignment so ids stay stable across restarts.

pub mod allocator_data;
pub mod allocator_operations;

pub use allocator_data::{CachedIdAllocator, IdAllocator};
pub use allocator_operations::{
    assigned_ids, create_allocator, load_allocator, save_allocator, seeded_allocator,
};
