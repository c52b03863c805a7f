//! Allocator Data - Pure DOP
//!
//! NO METHODS. Just data, plus the seam trait.
//! All transformations happen in allocator_operations.rs

use crate::error::RegistryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Reserves the next free numeric id for an identifier
pub trait IdAllocator: Send {
    fn allocate(&mut self, identifier: &str) -> RegistryResult<u32>;

    /// Make allocations survive a restart, if the allocator supports it
    fn persist(&self) -> RegistryResult<()> {
        Ok(())
    }
}

/// Range-bounded allocator backed by a persistent identifier -> id table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedIdAllocator {
    pub first_id: u32,
    pub last_id: u32,
    pub assigned: BTreeMap<String, u32>,
    /// File `persist` writes to, if any
    #[serde(skip)]
    pub cache_path: Option<PathBuf>,
}
