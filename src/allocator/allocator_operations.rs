//! Allocator Operations - Pure DOP Functions

use super::allocator_data::{CachedIdAllocator, IdAllocator};
use crate::error::{RegistryError, RegistryResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Create an empty allocator over `first_id..=last_id`
pub fn create_allocator(first_id: u32, last_id: u32) -> CachedIdAllocator {
    CachedIdAllocator {
        first_id,
        last_id,
        assigned: BTreeMap::new(),
        cache_path: None,
    }
}

/// Create an allocator that already knows some assignments
pub fn seeded_allocator(
    first_id: u32,
    last_id: u32,
    assigned: impl IntoIterator<Item = (String, u32)>,
) -> CachedIdAllocator {
    CachedIdAllocator {
        first_id,
        last_id,
        assigned: assigned.into_iter().collect(),
        cache_path: None,
    }
}

/// Load the id cache at `path`; a missing file starts an empty cache.
///
/// Cached assignments outside the configured range are kept; they were valid
/// when handed out and clients may already know them.
pub fn load_allocator(path: &Path, first_id: u32, last_id: u32) -> RegistryResult<CachedIdAllocator> {
    if !path.exists() {
        log::info!("No id cache at {}, starting fresh", path.display());
        let mut allocator = create_allocator(first_id, last_id);
        allocator.cache_path = Some(path.to_path_buf());
        return Ok(allocator);
    }

    let text = fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    let assigned: BTreeMap<String, u32> =
        serde_json::from_str(&text).map_err(|e| RegistryError::Serialization {
            context: format!("id cache {}", path.display()),
            error: e.to_string(),
        })?;
    log::info!("Loaded {} cached ids from {}", assigned.len(), path.display());
    let mut allocator = seeded_allocator(first_id, last_id, assigned);
    allocator.cache_path = Some(path.to_path_buf());
    Ok(allocator)
}

/// Sibling file the cache is staged in before it replaces `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the identifier -> id table to `path` as JSON.
///
/// The table is written and synced to a sibling file first, then renamed over
/// `path`, so a crash never leaves a truncated cache behind.
pub fn save_allocator(allocator: &CachedIdAllocator, path: &Path) -> RegistryResult<()> {
    let tmp_path = staging_path(path);
    let file = File::create(&tmp_path).map_err(|e| RegistryError::io(&tmp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &allocator.assigned).map_err(|e| {
        RegistryError::Serialization {
            context: format!("id cache {}", path.display()),
            error: e.to_string(),
        }
    })?;
    writer.flush().map_err(|e| RegistryError::io(&tmp_path, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| RegistryError::io(&tmp_path, e.into_error()))?;
    file.sync_all().map_err(|e| RegistryError::io(&tmp_path, e))?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| RegistryError::io(path, e))?;
    log::debug!("Saved {} ids to {}", allocator.assigned.len(), path.display());
    Ok(())
}

pub fn assigned_ids(allocator: &CachedIdAllocator) -> impl Iterator<Item = (&str, u32)> {
    allocator.assigned.iter().map(|(k, v)| (k.as_str(), *v))
}

fn next_free_id(allocator: &CachedIdAllocator) -> Option<u32> {
    let taken: BTreeSet<u32> = allocator.assigned.values().copied().collect();
    (allocator.first_id..=allocator.last_id).find(|id| !taken.contains(id))
}

impl IdAllocator for CachedIdAllocator {
    fn allocate(&mut self, identifier: &str) -> RegistryResult<u32> {
        if let Some(&id) = self.assigned.get(identifier) {
            log::debug!("Reusing cached id {} for '{}'", id, identifier);
            return Ok(id);
        }

        let id = next_free_id(self).ok_or_else(|| RegistryError::AllocationExhausted {
            identifier: identifier.to_string(),
            first: self.first_id,
            last: self.last_id,
        })?;
        self.assigned.insert(identifier.to_string(), id);
        log::debug!("Allocated id {} for '{}'", id, identifier);
        Ok(id)
    }

    fn persist(&self) -> RegistryResult<()> {
        match &self.cache_path {
            Some(path) => save_allocator(self, path),
            None => Ok(()),
        }
    }
}
