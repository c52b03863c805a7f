//! Permutation Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in permutation_operations.rs

use crate::palette::PropertyValue;
use serde::{Deserialize, Serialize};

/// Every value one block property can take, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDomain {
    pub name: String,
    pub values: Vec<PropertyValue>,
}

/// One concrete assignment; `assignment[i]` belongs to domain `i`
#[derive(Debug, Clone, PartialEq)]
pub struct Permutation {
    /// Position in enumeration order, doubles as block data value
    pub meta: u32,
    pub assignment: Vec<PropertyValue>,
}
