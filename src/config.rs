//! Registry configuration
//!
//! Loaded once at startup from TOML. Every field has a default so an empty
//! file (or no file at all) yields a working configuration.

use crate::block::CreativeCategory;
use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest number of states one block may expand to. Block data values are
/// sent as unsigned 16-bit integers.
pub const MAX_BLOCK_DATA_STATES: u32 = 1 << 16;

/// Main registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// First numeric id handed out to custom types
    pub first_block_id: u32,
    /// Last numeric id (inclusive) handed out to custom types
    pub last_block_id: u32,
    /// Upper bound on the permutations a single block may declare
    pub max_permutations: u32,
    /// Creative placement used when a block is registered without one
    pub default_creative_category: CreativeCategory,
    pub default_creative_group: String,
    /// Where the allocator persists identifier -> id assignments
    pub id_cache_path: Option<PathBuf>,
    /// `env_logger` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            first_block_id: 10_000,
            last_block_id: 10_000 + 4_095,
            max_permutations: MAX_BLOCK_DATA_STATES,
            default_creative_category: CreativeCategory::None,
            default_creative_group: String::new(),
            id_cache_path: None,
            log_filter: "info".to_string(),
        }
    }
}

/// Parse a configuration from TOML text and validate it
pub fn parse_config(text: &str) -> RegistryResult<RegistryConfig> {
    let config: RegistryConfig =
        toml::from_str(text).map_err(|e| RegistryError::Serialization {
            context: "registry config".to_string(),
            error: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> RegistryResult<RegistryConfig> {
    let text = fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    let config = parse_config(&text)?;
    log::debug!("Loaded registry config from {}", path.display());
    Ok(config)
}

/// Check the invariants the rest of the crate relies on
pub fn validate_config(config: &RegistryConfig) -> RegistryResult<()> {
    if config.first_block_id > config.last_block_id {
        return Err(RegistryError::InvalidConfig {
            field: "last_block_id".to_string(),
            value: config.last_block_id.to_string(),
            reason: format!("must not be below first_block_id ({})", config.first_block_id),
        });
    }
    if config.last_block_id > i32::MAX as u32 {
        return Err(RegistryError::InvalidConfig {
            field: "last_block_id".to_string(),
            value: config.last_block_id.to_string(),
            reason: "ids are shared with the signed item dictionary".to_string(),
        });
    }
    if config.max_permutations == 0 || config.max_permutations > MAX_BLOCK_DATA_STATES {
        return Err(RegistryError::InvalidConfig {
            field: "max_permutations".to_string(),
            value: config.max_permutations.to_string(),
            reason: format!("must be within 1..={}", MAX_BLOCK_DATA_STATES),
        });
    }
    Ok(())
}
