// src/utils/crypto.rs
//! Cryptographic hashing utilities.
//!
//! Uses SHA-256 for all commitment and proof digests. Digests travel through
//! the system as lowercase hex strings, which is also the form the ledger
//! stores and the form fed back into pairwise reduction.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of `data` and returns it as a lowercase hex
/// string.
///
/// # Arguments
/// * `data` - Binary data to hash
///
/// # Returns
/// 64-character hex encoding of the 32-byte digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
