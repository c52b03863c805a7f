//! Permutation Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.

use super::permutation_data::{Permutation, PropertyDomain};
use crate::palette::PropertyValue;

/// Number of permutations `domains` expand to, saturating at `u64::MAX`
pub fn permutation_count(domains: &[PropertyDomain]) -> u64 {
    domains
        .iter()
        .fold(1u64, |count, domain| count.saturating_mul(domain.values.len() as u64))
}

/// Cartesian product of all domains in mixed-radix order: the last domain
/// varies fastest. An empty domain list yields one empty assignment; any empty
/// domain yields nothing.
///
/// Callers bound the size with `permutation_count` first.
pub fn expand(domains: &[PropertyDomain]) -> Vec<Permutation> {
    let mut assignments: Vec<Vec<PropertyValue>> = vec![Vec::new()];
    for domain in domains {
        assignments = assignments
            .into_iter()
            .flat_map(|prefix| {
                domain.values.iter().map(move |value| {
                    let mut assignment = prefix.clone();
                    assignment.push(value.clone());
                    assignment
                })
            })
            .collect();
    }

    assignments
        .into_iter()
        .enumerate()
        .map(|(meta, assignment)| Permutation {
            meta: meta as u32,
            assignment,
        })
        .collect()
}
