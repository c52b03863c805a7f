//! Metadata Assembler
//!
//! Pure transformations from a registered type's static attributes into the
//! nested tag format clients expect.

pub mod metadata_operations;

pub use metadata_operations::*;
