// src/commitment.rs
//! Deterministic commitment over an ordered list of attribute values.
//!
//! The commitment root is produced by a pairwise hash reduction: every value
//! is hashed individually into a leaf, then adjacent nodes are combined
//! left-to-right until a single digest remains. Combination hashes the
//! concatenated hex text of the two child digests, and an odd trailing node
//! is carried into the next level unchanged. Both rules are wire
//! compatibility constraints: the ledger and every previously issued
//! certificate commit to exactly this reduction.

use crate::error::{Error, Result};
use crate::utils::crypto::sha256_hex;

/// Reduces an ordered, non-empty list of values to a single commitment root.
///
/// # Arguments
/// * `values` - Attribute values in their agreed order
///
/// # Returns
/// Lowercase hex digest committing to every value and to their order.
///
/// # Errors
/// `Error::EmptyInput` when `values` is empty.
///
/// # Guarantees
/// Deterministic for a fixed input; changing any value or swapping two
/// values changes the root with overwhelming probability.
pub fn build_root<S: AsRef<str>>(values: &[S]) -> Result<String> {
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut nodes: Vec<String> = values
        .iter()
        .map(|value| sha256_hex(value.as_ref().as_bytes()))
        .collect();

    while nodes.len() > 1 {
        let mut next = Vec::with_capacity((nodes.len() + 1) / 2);
        for pair in nodes.chunks(2) {
            if let [left, right] = pair {
                next.push(sha256_hex(format!("{left}{right}").as_bytes()));
            } else {
                // Odd node count: the last node moves up a level as-is.
                next.push(pair[0].clone());
            }
        }
        nodes = next;
    }

    Ok(nodes.swap_remove(0))
}
