//! Error handling for the block and item registries
//!
//! Every failure in this crate is a configuration mistake surfaced at startup.
//! Errors propagate straight to the registration caller; nothing is retried and
//! nothing is rolled back.

use std::path::Path;

/// Main error type for registration and palette maintenance
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    // Input errors
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Identifier '{identifier}' is already registered")]
    DuplicateIdentifier { identifier: String },

    #[error("Numeric id {id} is already present in the runtime registry")]
    DuplicateId { id: u32 },

    #[error("Permutable block '{identifier}' registered without a state {missing}")]
    MissingCodec {
        identifier: String,
        missing: &'static str,
    },

    #[error("Factory for '{identifier}' produced an invalid block: {reason}")]
    InvalidFactoryResult { identifier: String, reason: String },

    #[error("Permutable block '{identifier}' expands to {count} states (max: {max})")]
    PermutationOverflow {
        identifier: String,
        count: u64,
        max: u32,
    },

    // Allocation errors
    #[error("No numeric id left for '{identifier}' (range {first}..={last} is full)")]
    AllocationExhausted {
        identifier: String,
        first: u32,
        last: u32,
    },

    #[error("Dictionary conflict: '{identifier}' <-> {id} clashes with existing {existing}")]
    DictionaryConflict {
        identifier: String,
        id: i32,
        existing: String,
    },

    // Lookup errors
    #[error("'{identifier}' is not registered")]
    NotRegistered { identifier: String },

    #[error("No state mapping for {context}")]
    UnmappedState { context: String },

    // Configuration errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // System errors
    #[error("IO error for {path}: {error}")]
    Io { path: String, error: String },

    #[error("Serialization error in {context}: {error}")]
    Serialization { context: String, error: String },

    #[error("Channel closed: {name}")]
    ChannelClosed { name: String },
}

/// Type alias for Results in the registry
pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    /// Wrap an IO failure with the path it happened on
    pub fn io(path: &Path, error: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        RegistryError::Validation {
            reason: reason.into(),
        }
    }
}

impl<T> From<crossbeam_channel::SendError<T>> for RegistryError {
    fn from(_: crossbeam_channel::SendError<T>) -> Self {
        RegistryError::ChannelClosed {
            name: "worker".to_string(),
        }
    }
}

impl From<crossbeam_channel::RecvError> for RegistryError {
    fn from(_: crossbeam_channel::RecvError) -> Self {
        RegistryError::ChannelClosed {
            name: "worker".to_string(),
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_registry<F>(self, f: F) -> RegistryResult<T>
    where
        F: FnOnce() -> RegistryError;

    /// Shorthand for a missing identifier
    fn or_not_registered(self, identifier: &str) -> RegistryResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_registry<F>(self, f: F) -> RegistryResult<T>
    where
        F: FnOnce() -> RegistryError,
    {
        self.ok_or_else(f)
    }

    fn or_not_registered(self, identifier: &str) -> RegistryResult<T> {
        self.ok_or_else(|| RegistryError::NotRegistered {
            identifier: identifier.to_string(),
        })
    }
}
