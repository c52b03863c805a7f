//! Permutation Expander
//!
//! Turns a block's declared property domains into every concrete assignment.

pub mod permutation_data;
pub mod permutation_operations;

pub use permutation_data::{Permutation, PropertyDomain};
pub use permutation_operations::{expand, permutation_count};
